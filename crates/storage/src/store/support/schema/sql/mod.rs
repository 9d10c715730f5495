#![forbid(unsafe_code)]

mod sequencing;
mod state;
mod versioning;

pub(super) fn full_schema_sql() -> String {
    let mut sql = String::new();
    sql.push_str(state::SQL);
    sql.push_str(versioning::SQL);
    sql.push_str(sequencing::SQL);
    sql
}
