use ownership_macros::value_object;

#[value_object]
struct Label {
    text: String,
}

#[value_object(debug = false)]
struct Opaque(i32);

#[value_object(default = true)]
enum Level {
    #[default]
    Low,
    High,
}

fn main() {
    let a = Label { text: "x".into() };
    let _ = format!("{:?}", a.clone());
    assert!(a == Label { text: "x".into() });

    let _ = Opaque(1).clone();

    let lv: Level = Default::default();
    assert!(lv == Level::Low);
    assert!(Level::High != Level::Low);
}
