use tablemap::Record;

#[derive(Record)]
enum Fruit {
    Apple,
    Pear,
}

fn main() {}
