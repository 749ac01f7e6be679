use tablemap::Record;

#[derive(Record)]
struct Point(i32, i32);

fn main() {}
