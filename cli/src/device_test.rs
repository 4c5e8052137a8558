use super::*;

#[test]
fn cell_renders_two_columns() {
    let points = [true, false, false, false, true, true];
    assert_eq!(render_cell(points), "● ○\n○ ●\n○ ●");
}

#[test]
fn empty_cell_is_all_open() {
    assert_eq!(render_cell([false; 6]), "○ ○\n○ ○\n○ ○");
}
