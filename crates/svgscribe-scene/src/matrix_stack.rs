use std::cell::Cell;
use svgscribe_core::Matrix;

/// Transforms of the open containers, innermost last.
///
/// The bottom entry belongs to the document, the top entry is the world transform that the
/// transform commands edit. It never holds fewer than one entry and starts with two.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    entries: Vec<Matrix>,
    result: Cell<Option<Matrix>>,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            entries: vec![Matrix::identity(), Matrix::identity()],
            result: Cell::new(None),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push_identity(&mut self) {
        self.entries.push(Matrix::identity());
        self.result.set(None);
    }

    /// Removes the top entry unless it is the last one.
    pub fn pop(&mut self) -> Option<Matrix> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.result.set(None);
        self.entries.pop()
    }

    /// Pops, then pushes a copy of the new top: the world transform falls back to the enclosing
    /// container's transform rather than to identity.
    pub fn reset_current(&mut self) {
        self.pop();
        let top = self.top();
        self.entries.push(top);
        self.result.set(None);
    }

    pub fn top(&self) -> Matrix {
        self.entries.last().copied().unwrap_or_else(Matrix::identity)
    }

    pub fn set_top(&mut self, m: Matrix) {
        match self.entries.last_mut() {
            Some(top) => *top = m,
            None => self.entries.push(m),
        }
        self.result.set(None);
    }

    /// Applies `f` to the top entry.
    pub fn update_top(&mut self, f: impl FnOnce(Matrix) -> Matrix) {
        let next = f(self.top());
        self.set_top(next);
    }

    /// Product of the non-identity entries; the innermost transform applies first.
    pub fn result(&self) -> Matrix {
        if let Some(m) = self.result.get() {
            return m;
        }
        let m = self
            .entries
            .iter()
            .rev()
            .filter(|m| **m != Matrix::identity())
            .fold(Matrix::identity(), |acc, m| acc.then(m));
        self.result.set(Some(m));
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgscribe_core::geom::point;

    fn translate(x: f64, y: f64) -> Matrix {
        Matrix::translation(x, y)
    }

    #[test]
    fn starts_with_two_identities_and_keeps_one() {
        let mut s = MatrixStack::new();
        assert_eq!(s.len(), 2);
        assert!(s.pop().is_some());
        assert!(s.pop().is_none());
        assert_eq!(s.len(), 1);
        assert_eq!(s.result(), Matrix::identity());
    }

    #[test]
    fn result_applies_innermost_first() {
        let mut s = MatrixStack::new();
        s.set_top(Matrix::scale(2.0, 2.0));
        s.push_identity();
        s.set_top(translate(5.0, 0.0));
        let p = s.result().transform_point(point(1.0, 1.0));
        assert_eq!(p, point(12.0, 2.0));
    }

    #[test]
    fn result_is_recomputed_after_edits() {
        let mut s = MatrixStack::new();
        assert_eq!(s.result(), Matrix::identity());
        s.update_top(|m| m.then(&translate(1.0, 2.0)));
        assert_eq!(s.result(), translate(1.0, 2.0));
        s.pop();
        assert_eq!(s.result(), Matrix::identity());
    }

    #[test]
    fn reset_inherits_the_enclosing_transform() {
        let mut s = MatrixStack::new();
        s.set_top(translate(10.0, 0.0));
        s.push_identity();
        s.set_top(Matrix::scale(3.0, 3.0));
        s.reset_current();
        assert_eq!(s.len(), 3);
        assert_eq!(s.top(), translate(10.0, 0.0));
        // The enclosing translation now applies twice.
        assert_eq!(s.result(), translate(20.0, 0.0));
    }

    #[test]
    fn reset_at_document_level_is_identity() {
        let mut s = MatrixStack::new();
        s.set_top(translate(4.0, 4.0));
        s.reset_current();
        assert_eq!(s.result(), Matrix::identity());
    }
}
