use super::*;

#[test]
fn releases_newest_first_and_empties() {
    let mut scope = Scope::new();
    assert_eq!(scope.acquire("smoothing"), 0);
    assert_eq!(scope.acquire("pins"), 1);
    scope.acquire("frame loop");
    assert_eq!(scope.len(), 3);

    let mut order = Vec::new();
    scope.release_all(|r| order.push(r));
    assert_eq!(order, vec!["frame loop", "pins", "smoothing"]);
    assert!(scope.is_empty());

    scope.release_all(|_| panic!("already released"));
}
