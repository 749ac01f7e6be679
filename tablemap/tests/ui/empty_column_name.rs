use tablemap::Record;

#[derive(Record)]
struct Product {
    id: i32,
    #[sql(name = "")]
    title: String,
}

fn main() {}
