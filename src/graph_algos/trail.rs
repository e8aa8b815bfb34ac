use crate::geometry::Position;


/// Arena of path links shared by all frontier entries of one search
/// Each link is (position, parent link index), the start link has parent usize::MAX.
/// A frontier entry stores the index of its own link, which makes the chain of parents its path-so-far
#[derive(Debug)]
pub(crate) struct Trail {
    links: Vec<(Position, usize)>,
}

impl Trail {

    /// New trail holding only the start, at index 0
    pub(crate) fn new(start: Position) -> Self {
        Self { links: vec![(start, usize::MAX)] }
    }

    /// Append `position` after the link at `parent`, returning the new link index
    pub(crate) fn extend(&mut self, parent: usize, position: Position) -> usize {
        self.links.push((position, parent));
        self.links.len() - 1
    }

    /// Construct the path from the start to the link at `index`
    /// Returns the ordered path as a vector of positions from start to that link
    pub(crate) fn path(&self, index: usize) -> Vec<Position> {
        let mut path = Vec::new();
        let mut current_index = index;

        // Trace back to the start
        while let Some(&(position, parent_index)) = self.links.get(current_index) {
            path.push(position);
            current_index = parent_index;
        }

        // The path is in reverse order, so reverse it
        path.reverse();
        path
    }
}
