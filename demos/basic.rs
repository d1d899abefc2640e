//! Basic example: parse a template string and print its tree.
//!
//! Run with: `cargo run --example basic`

use sailtree_parser::Parser;

fn main() {
    let template = r#"<html>
  <body>
    <%# render one row per item %>
    <ul>
      <% for item in &items { %>
        <li><%= item.name %></li>
      <% } %>
    </ul>
  </body>
</html>
"#;

    let mut parser = Parser::new();
    let tree = parser.parse(template);

    println!("s-expression:\n{}\n", tree.to_sexp());
    println!("nodes:\n{}", tree.ranges(true));

    for node in tree.root().children() {
        println!("{:>14}: {:?}", node.kind(), node.text(template));
    }
}
