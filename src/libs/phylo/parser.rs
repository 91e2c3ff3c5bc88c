use super::error::TreeError;
use super::node::NodeId;
use super::tree::Tree;
use nom::{
    branch::alt,
    bytes::complete::{is_not, take_while},
    character::complete::{char, digit1, multispace0},
    combinator::{cut, map, map_res, opt, recognize},
    error::{context, ContextError, ErrorKind, FromExternalError, ParseError},
    multi::{many1, separated_list1},
    sequence::{delimited, preceded},
    IResult, Offset, Parser,
};

/// Accumulated parse failures, innermost first. Every entry keeps the
/// remaining input at the point of failure, which later becomes a
/// line/column position in the reported error.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseTrace<'a> {
    pub entries: Vec<(&'a str, TraceKind)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TraceKind {
    Context(&'static str),
    Nom(ErrorKind),
}

impl<'a> ParseError<&'a str> for ParseTrace<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        ParseTrace {
            entries: vec![(input, TraceKind::Nom(kind))],
        }
    }

    fn append(input: &'a str, kind: ErrorKind, mut other: Self) -> Self {
        other.entries.push((input, TraceKind::Nom(kind)));
        other
    }
}

impl<'a> ContextError<&'a str> for ParseTrace<'a> {
    fn add_context(input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        other.entries.push((input, TraceKind::Context(ctx)));
        other
    }
}

impl<'a, E> FromExternalError<&'a str, E> for ParseTrace<'a> {
    fn from_external_error(input: &'a str, kind: ErrorKind, _e: E) -> Self {
        ParseTrace {
            entries: vec![(input, TraceKind::Nom(kind))],
        }
    }
}

/// Recursive value produced by the grammar before it is flattened into
/// the arena. The grammar is naturally recursive; the arena is not, so
/// parsing goes through this intermediate and `graft` flattens it.
#[derive(Debug)]
struct RawNode {
    name: Option<String>,
    length: Option<f64>,
    children: Vec<RawNode>,
}

impl RawNode {
    /// Flatten into the arena. The node claims its slot before its
    /// children, so arena ids run parent-before-child.
    fn graft(self, tree: &mut Tree) -> NodeId {
        let id = tree.add_node();
        for child in self.children {
            let child_id = child.graft(tree);
            // Both slots were just created, the link cannot fail
            tree.add_child(id, child_id).unwrap();
        }
        if let Some(node) = tree.get_node_mut(id) {
            node.name = self.name;
            node.length = self.length;
        }
        id
    }
}

/// Run `inner` with surrounding whitespace (including newlines) eaten.
fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

/// A node label: bare text stopping at Newick punctuation, or quoted
/// with `'` or `"`. Inside a quoted label a doubled quote stands for the
/// quote character itself.
fn node_label(input: &str) -> IResult<&str, String, ParseTrace<'_>> {
    let bare = map(take_while(|c: char| !"():;,[]".contains(c)), |s: &str| {
        s.trim().to_string()
    });
    let single = delimited(
        char('\''),
        map(is_not("'"), |s: &str| s.replace("''", "'")),
        char('\''),
    );
    let double = delimited(
        char('"'),
        map(is_not("\""), |s: &str| s.replace("\"\"", "\"")),
        char('"'),
    );

    context("label", alt((single, double, bare))).parse(input)
}

/// A decimal literal with optional sign, fraction and exponent. Branch
/// lengths never legitimately read `inf` or `nan`, so those are not
/// accepted.
fn decimal(input: &str) -> IResult<&str, f64, ParseTrace<'_>> {
    map_res(
        recognize((
            opt(char('-')),
            digit1,
            opt((char('.'), digit1)),
            opt((
                alt((char('e'), char('E'))),
                opt(alt((char('+'), char('-')))),
                digit1,
            )),
        )),
        |s: &str| s.parse::<f64>(),
    )
    .parse(input)
}

/// `:length`. Once the colon is seen the number is mandatory; `cut`
/// commits so the error points at the bad number instead of a later
/// backtracked position.
fn branch_length(input: &str) -> IResult<&str, f64, ParseTrace<'_>> {
    context("length", preceded(ws(char(':')), cut(decimal))).parse(input)
}

/// Swallow one optional `[...]` block. Comments and NHX-style
/// annotations carry nothing this crate consumes, so the content is
/// dropped.
fn skip_comment(input: &str) -> IResult<&str, (), ParseTrace<'_>> {
    let block = delimited(ws(char('[')), is_not("]"), char(']'));

    map(opt(block), |_| ()).parse(input)
}

/// One clade: an optional parenthesized child list, an optional label,
/// then an optional branch length with comments allowed on either side
/// of it.
fn parse_clade(input: &str) -> IResult<&str, RawNode, ParseTrace<'_>> {
    let (input, children) = context(
        "children",
        opt(delimited(
            ws(char('(')),
            separated_list1(ws(char(',')), parse_clade),
            ws(char(')')),
        )),
    )
    .parse(input)?;

    let (input, label) = opt(node_label).parse(input)?;
    let (input, _) = skip_comment(input)?;
    let (input, length) = opt(branch_length).parse(input)?;
    let (input, _) = skip_comment(input)?;

    Ok((
        input,
        RawNode {
            name: label.filter(|l| !l.is_empty()),
            length,
            children: children.unwrap_or_default(),
        },
    ))
}

fn plant(raw: RawNode) -> Tree {
    let mut tree = Tree::new();
    let root = raw.graft(&mut tree);
    tree.set_root(root);
    tree
}

/// Parse exactly one `;`-terminated Newick tree.
pub fn parse_newick(input: &str) -> Result<Tree, TreeError> {
    let mut parser = (ws(parse_clade), ws(char(';')));

    match parser.parse(input) {
        Ok((_, (raw, _))) => Ok(plant(raw)),
        Err(nom::Err::Error(trace)) | Err(nom::Err::Failure(trace)) => {
            Err(to_tree_error(input, trace))
        }
        Err(nom::Err::Incomplete(_)) => Err(TreeError {
            message: "Incomplete input".to_string(),
            line: 0,
            column: 0,
            snippet: String::new(),
        }),
    }
}

/// Parse every tree in the input. Top-level `[...]` blocks between
/// trees (Nexus-style headers and the like) are skipped.
pub fn parse_newick_multi(input: &str) -> Result<Vec<Tree>, TreeError> {
    let tree = map((ws(parse_clade), ws(char(';'))), |(raw, _)| Some(raw));
    let header = map(
        ws(delimited(char('['), take_while(|c: char| c != ']'), char(']'))),
        |_| None,
    );

    match many1(alt((tree, header))).parse(input) {
        Ok((_, parsed)) => Ok(parsed.into_iter().flatten().map(plant).collect()),
        Err(nom::Err::Error(trace)) | Err(nom::Err::Failure(trace)) => {
            Err(to_tree_error(input, trace))
        }
        Err(nom::Err::Incomplete(_)) => Err(TreeError {
            message: "Incomplete input".to_string(),
            line: 0,
            column: 0,
            snippet: String::new(),
        }),
    }
}

/// Turn the innermost failure into a positioned `TreeError`.
fn to_tree_error(input: &str, trace: ParseTrace) -> TreeError {
    let remaining = trace.entries.first().map_or(input, |entry| entry.0);
    let offset = input.offset(remaining);
    let consumed = &input[..offset];

    let line = consumed.matches('\n').count() + 1;
    let line_start = consumed.rfind('\n').map_or(0, |p| p + 1);
    let column = offset - line_start + 1;

    let mut message = String::new();
    for (_, kind) in trace.entries.iter().rev() {
        match kind {
            TraceKind::Context(ctx) => {
                message.push_str(&format!("while parsing {}:\n", ctx));
            }
            TraceKind::Nom(k) => {
                message.push_str(&format!("  error: {:?}\n", k));
            }
        }
    }

    TreeError {
        message,
        line,
        column,
        snippet: remaining.chars().take(50).collect(),
    }
}

impl Tree {
    /// Parse a single Newick string.
    ///
    /// # Example
    /// ```
    /// use pepr::libs::phylo::tree::Tree;
    ///
    /// let tree = Tree::from_newick("(A:0.1,B:0.2)Root;").unwrap();
    /// assert_eq!(tree.len(), 3);
    ///
    /// let broken = Tree::from_newick("(A,B:oops)C;");
    /// assert!(broken.is_err());
    /// ```
    pub fn from_newick(input: &str) -> Result<Self, TreeError> {
        parse_newick(input)
    }

    /// Parse a whole file's worth of trees.
    pub fn from_newick_multi(input: &str) -> Result<Vec<Self>, TreeError> {
        parse_newick_multi(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple() {
        let tree = Tree::from_newick("(A,B)top;").unwrap();
        assert_eq!(tree.len(), 3);

        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        assert_eq!(root.name.as_deref(), Some("top"));
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn parse_branch_lengths() {
        let tree = Tree::from_newick("(tip1:0.03,tip2:1.2e-2)anc:4;").unwrap();

        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        assert_eq!(root.name.as_deref(), Some("anc"));
        assert_eq!(root.length, Some(4.0));

        let first = tree.get_node(root.children[0]).unwrap();
        assert_eq!(first.length, Some(0.03));

        let second = tree.get_node(root.children[1]).unwrap();
        assert_eq!(second.length, Some(0.012));
    }

    #[test]
    fn parse_skips_comments() {
        // NHX annotations sit in a comment block after the label
        let tree = Tree::from_newick("(A:0.1,B:0.2)n1[&&NHX:S=fungi:E=1.5];").unwrap();

        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        assert_eq!(root.name.as_deref(), Some("n1"));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn parse_loose_whitespace() {
        let tree = Tree::from_newick("  ( tip_a : 0.5 ,\n\ttip_b )\nanc ;\n").unwrap();
        assert_eq!(tree.len(), 3);

        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        assert_eq!(root.name.as_deref(), Some("anc"));

        let first = tree.get_node(root.children[0]).unwrap();
        assert_eq!(first.name.as_deref(), Some("tip_a"));
        assert_eq!(first.length, Some(0.5));

        let second = tree.get_node(root.children[1]).unwrap();
        assert_eq!(second.name.as_deref(), Some("tip_b"));
        assert_eq!(second.length, None);
    }

    #[test]
    fn parse_trifurcation() {
        // Unrooted trees are conventionally written with three children
        // at the top
        let tree = Tree::from_newick("(A:0.1,B:0.2,(C:0.3,D:0.4):0.5);").unwrap();
        assert_eq!(tree.len(), 6);

        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.name, None);
    }

    #[test]
    fn parse_quoted_labels() {
        let tree =
            Tree::from_newick("('Puccinia graminis':1,\"Ustilago (maydis)\":2)x;").unwrap();
        let root = tree.get_node(tree.get_root().unwrap()).unwrap();

        let first = tree.get_node(root.children[0]).unwrap();
        assert_eq!(first.name.as_deref(), Some("Puccinia graminis"));

        let second = tree.get_node(root.children[1]).unwrap();
        assert_eq!(second.name.as_deref(), Some("Ustilago (maydis)"));
    }

    #[test]
    fn parse_arena_links() {
        // Arena ids run parent-before-children; the post-order numbering
        // used elsewhere is a separate layer. Check the raw links here.
        let tree = Tree::from_newick("((A,B)ab,C)R;").unwrap();

        let root_id = tree.get_root().unwrap();
        assert_eq!(tree.get_node(root_id).unwrap().parent, None);

        for &child in &tree.get_node(root_id).unwrap().children {
            assert_eq!(tree.get_node(child).unwrap().parent, Some(root_id));
        }
    }

    #[test]
    fn parse_multiple_trees() {
        let input = "[run of 2]\n(A,B);\n((C,D),E);\n";
        let trees = Tree::from_newick_multi(input).unwrap();

        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].len(), 3);
        assert_eq!(trees[1].len(), 5);
    }

    #[test]
    fn parse_errors_carry_position() {
        // Missing semicolon: the error points just past the tree text
        match Tree::from_newick("(A,B)C") {
            Err(TreeError { line, column, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(column, 7);
            }
            Ok(tree) => panic!("expected a parse error, got {:?}", tree),
        }

        // A colon commits to a number
        match Tree::from_newick("(A,B:oops)C;") {
            Err(TreeError { line, message, .. }) => {
                assert_eq!(line, 1);
                assert!(message.contains("length"));
            }
            Ok(tree) => panic!("expected a parse error, got {:?}", tree),
        }
    }
}
