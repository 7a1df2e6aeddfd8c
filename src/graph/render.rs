//! Textual dump of a graph.
//!
//! One block per live vertex, in slot order:
//!
//! ```text
//! Element : 3
//! 	Voisins : [5;1;NULL]
//! ```
//!
//! Only real edges are listed; back-references of directed graphs are skipped.

use core::fmt;

use super::Graph;

impl<C: fmt::Display> Graph<C> {
    /// Renders every vertex with its real neighbours, see the module docs.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<C: fmt::Display> fmt::Display for Graph<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, slot) in self.arena.occupied_slots() {
            write!(f, "Element : {}\n\tVoisins : [", slot.content)?;
            for entry in slot.neighbors.iter().filter(|entry| entry.direct) {
                if let Some(neighbor) = self.arena.aliased(entry.target) {
                    write!(f, "{};", neighbor.content)?;
                }
            }
            f.write_str("NULL]\n")?;
        }
        Ok(())
    }
}
