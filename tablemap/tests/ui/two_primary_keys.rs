use tablemap::Record;

#[derive(Record)]
struct Membership {
    #[sql(primary_key)]
    user_id: i32,
    #[sql(primary_key)]
    group_id: i32,
    role: String,
}

fn main() {}
