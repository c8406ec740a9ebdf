use colaborador_macros::value_object;

#[value_object]
struct Score {
    value: i64,
}

#[value_object(debug = false)]
struct Opaque(i32);

#[value_object(ordered = true)]
struct Seconds(u64);

#[value_object]
enum Shift {
    #[default]
    Day,
    Night,
}

fn main() {
    let _ = format!("{:?}", Score { value: 0 });

    let a = Score::default();
    let _b = a.clone();
    let _eq = a == Score { value: 0 };

    let _ = Opaque(1);

    // ordered = true: Copy + Ord
    let s = Seconds(5);
    let t = s;
    assert!(s <= t);

    let _shift: Shift = Default::default();
}
