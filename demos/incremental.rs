//! Incremental example: edit a document and reparse only the damage.
//!
//! Run with: `cargo run --example incremental`

use sailtree_core::InputEdit;
use sailtree_parser::Parser;

fn main() {
    let old_source = "<h1><%= title %></h1><p>welcome</p>";
    let mut parser = Parser::new();
    let old_tree = parser.parse(old_source);
    println!("before: {}", old_tree.to_sexp());

    // Replace `welcome` with an expression block.
    let start = old_source.find("welcome").unwrap();
    let old_end = start + "welcome".len();
    let replacement = "<%= greeting %>";

    let mut new_source = String::new();
    new_source.push_str(&old_source[..start]);
    new_source.push_str(replacement);
    new_source.push_str(&old_source[old_end..]);
    let edit = InputEdit::new(start, old_end, start + replacement.len());

    let new_tree = parser.reparse(&new_source, &old_tree, edit);
    println!("after:  {}", new_tree.to_sexp());

    assert_eq!(new_tree, parser.parse(&new_source));
    println!("incremental reparse matches a full parse");
}
