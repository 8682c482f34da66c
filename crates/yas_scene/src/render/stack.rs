//! Transform stack with scoped push/pop

use std::ops::{Deref, DerefMut};

use crate::foundation::math::Mat4;

/// Accumulated model transform plus saved copies
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl TransformStack {
    /// Identity transform, nothing saved
    pub fn new() -> Self {
        Self {
            current: Mat4::identity(),
            saved: Vec::new(),
        }
    }

    /// Current accumulated transform
    pub const fn current(&self) -> &Mat4 {
        &self.current
    }

    /// Number of saved transforms
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Save the current transform; it is restored when the scope drops
    pub fn push(&mut self) -> TransformScope<'_> {
        self.saved.push(self.current);
        TransformScope { stack: self }
    }

    /// Post-multiply the current transform
    pub fn multiply(&mut self, matrix: &Mat4) {
        self.current = self.current * matrix;
    }

    fn pop(&mut self) {
        if let Some(saved) = self.saved.pop() {
            self.current = saved;
        }
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard returned by [`TransformStack::push`]
///
/// Derefs to the stack so nested scopes can be pushed through it. Dropping
/// the guard restores the transform saved at push time, on every exit path.
pub struct TransformScope<'s> {
    stack: &'s mut TransformStack,
}

impl Deref for TransformScope<'_> {
    type Target = TransformStack;

    fn deref(&self) -> &TransformStack {
        self.stack
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut TransformStack {
        self.stack
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4Ext, Vec3};

    #[test]
    fn test_scope_restores_transform() {
        let mut stack = TransformStack::new();
        {
            let mut outer = stack.push();
            outer.multiply(&Mat4::translation(Vec3::new(1.0, 0.0, 0.0)));
            {
                let mut inner = outer.push();
                inner.multiply(&Mat4::scaling(Vec3::new(2.0, 2.0, 2.0)));
                assert_eq!(inner.depth(), 2);
            }
            assert_eq!(outer.depth(), 1);
            assert_eq!(*outer.current(), Mat4::translation(Vec3::new(1.0, 0.0, 0.0)));
        }
        assert_eq!(stack.depth(), 0);
        assert_eq!(*stack.current(), Mat4::identity());
    }

    #[test]
    fn test_early_return_still_pops() {
        fn visit(stack: &mut TransformStack, skip: bool) -> Option<()> {
            let mut scope = stack.push();
            scope.multiply(&Mat4::rotation_z(1.0));
            if skip {
                return None;
            }
            Some(())
        }

        let mut stack = TransformStack::new();
        assert!(visit(&mut stack, true).is_none());
        assert!(visit(&mut stack, false).is_some());
        assert_eq!(stack.depth(), 0);
        assert_eq!(*stack.current(), Mat4::identity());
    }
}
