use tablemap::Record;

#[derive(Record)]
struct Session {
    #[sql(primary_key, skip)]
    token: String,
    user: String,
}

fn main() {}
