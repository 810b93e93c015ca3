use quanta_cover::{gaps_within, Quantum, QuantumCollection};

fn main() {
    let mut busy: QuantumCollection = [
        Quantum::new(123.0, 321.0),
        Quantum::new(2_342_933.0, 82_888_329.0),
        Quantum::new(2_322.0, 23_421.0),
        Quantum::new(2.0, 12_342.0),
    ]
    .into_iter()
    .collect();

    println!("raw total: {} s", busy.total_seconds());

    busy.make_disjoint(false);
    for q in &busy {
        println!("busy {q} ({} min)", q.duration_minutes());
    }
    println!("covered total: {} s", busy.total_seconds());

    if let Some(span) = busy.span() {
        for gap in gaps_within(span, busy.elements()) {
            println!("free {gap}");
        }
    }
}
