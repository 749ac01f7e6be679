use tablemap::Record;

#[derive(Record)]
struct Product {
    id: i32,
    #[sql(rename = "title")]
    name: String,
}

fn main() {}
