use super::Tree;
use crate::libs::phylo::node::NodeId;
use std::io::Read;

/// Read all Newick trees from a file, `"stdin"` included.
pub fn from_file(infile: &str) -> anyhow::Result<Vec<Tree>> {
    let mut newick = String::new();
    crate::libs::io::reader(infile)
        .read_to_string(&mut newick)
        .map_err(|e| anyhow::anyhow!("Read error: {}", e))?;
    Ok(Tree::from_newick_multi(&newick)?)
}

/// Serialize to a single-line Newick string. An empty tree comes out as
/// a bare `;`.
pub fn to_newick(tree: &Tree) -> String {
    let mut out = String::new();
    if let Some(root) = tree.get_root() {
        write_clade(tree, root, &mut out);
    }
    out.push(';');
    out
}

fn write_clade(tree: &Tree, id: NodeId, out: &mut String) {
    let node = tree.get_node(id).unwrap();

    if let Some((first, rest)) = node.children.split_first() {
        out.push('(');
        write_clade(tree, *first, out);
        for &child in rest {
            out.push(',');
            write_clade(tree, child, out);
        }
        out.push(')');
    }

    if let Some(name) = &node.name {
        // Labels holding Newick punctuation or whitespace get quoted
        if name.chars().any(|c| "(),:;[] \t\n".contains(c)) {
            out.push('\'');
            out.push_str(name);
            out.push('\'');
        } else {
            out.push_str(name);
        }
    }
    if let Some(len) = node.length {
        out.push_str(&format!(":{}", len));
    }
}
