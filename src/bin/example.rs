use dynamic_forest::DynamicForest;

fn link(f: &mut DynamicForest, u: usize, v: usize) {
    println!("Linking {} and {}", u, v);
    f.link(u, v);
}

fn cut(f: &mut DynamicForest, u: usize, v: usize) {
    println!("Cutting {} and {}", u, v);
    f.cut(u, v);
}

fn query(f: &DynamicForest, u: usize, v: usize) {
    println!(
        "Are {} and {} connected? {}",
        u,
        v,
        if f.connected(u, v) { "Yes" } else { "No" }
    );
}

fn main() {
    let mut f = DynamicForest::new(10);
    for u in 0..9 {
        link(&mut f, u, u + 1);
    }
    println!("Created a path over vertices 0 to 9");
    query(&f, 0, 9);
    cut(&mut f, 4, 5);
    query(&f, 0, 9);
    query(&f, 5, 9);
    println!("The forest now has {} components", f.component_count());
    link(&mut f, 2, 7);
    query(&f, 0, 9);
    println!("Euler tour of the tree holding 0: {:?}", f.tour(0));
}
