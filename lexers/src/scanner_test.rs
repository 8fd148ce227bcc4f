use crate::scanner::Scanner;

#[test]
fn test_extremes() {
    let mut s = Scanner::new("just a test buffer@".chars());
    assert_eq!(s.curr(), None);
    assert_eq!(s.pos(), -1);
    assert_eq!(s.next(), Some('j'));
    while s.next() != Some('@') {}
    assert_eq!(s.curr(), Some('@'));
    assert_eq!(s.pos(), 18);
    // backtrack within what was already buffered
    assert!(s.set_pos(16));
    assert_eq!(s.curr(), Some('e'));
    assert_eq!(s.next(), Some('r'));
    assert_eq!(s.next(), Some('@'));
    assert_eq!(s.next(), None);
    assert_eq!(s.next(), None);
    assert!(!s.set_pos(20));
    assert!(s.set_pos(-1));
    assert_eq!(s.curr(), None);
}

#[test]
fn test_extract() {
    let mut s = Scanner::new("just a test buffer@".chars());
    for _ in 0..4 { assert!(s.next().is_some()); }
    assert_eq!(s.extract().iter().collect::<String>(), "just");
    assert_eq!(s.peek(), Some(' '));
    assert_eq!(s.pos(), -1);
    assert_eq!(s.next(), Some(' '));
    for _ in 0..6 { assert!(s.next().is_some()); }
    assert_eq!(s.extract_string(), " a test");
    assert_eq!(s.next(), Some(' '));
}

#[test]
fn test_accept() {
    let mut s = Scanner::new("heey  you!".chars());
    assert_eq!(s.accept_any(&['h', 'e']), Some('h'));
    assert_eq!(s.curr(), Some('h'));
    assert_eq!(s.accept_any(&['h', 'e']), Some('e'));
    assert_eq!(s.accept_any(&['h', 'y', 'e']), Some('e'));
    assert_eq!(s.accept(&'e'), None);
    assert_eq!(s.curr(), Some('e'));
    assert_eq!(s.accept(&'y'), Some('y'));
    assert!(s.skip_all(&[' ']));
    assert!(!s.skip_all(&[' ']));
    assert_eq!(s.curr(), Some(' '));
    assert_eq!(s.peek(), Some('y'));
}

#[test]
fn test_until() {
    let mut s = Scanner::new("heey  you!".chars());
    assert!(s.until_any(&['!']));
    assert!(!s.until_any(&['!']));
    assert_eq!(s.curr(), Some('u'));
    assert_eq!(s.accept(&'!'), Some('!'));
    assert_eq!(s.next(), None);
    assert_eq!(s.curr(), None);
}
