/// Single-slot click mailbox. A newer click replaces an unread one; each click
/// can be taken exactly once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingClick {
    position: Option<(f64, f64)>,
    consumed: bool,
}

impl Default for PendingClick {
    fn default() -> Self {
        Self {
            position: None,
            consumed: true,
        }
    }
}

impl PendingClick {
    pub fn set(&mut self, x: f64, y: f64) {
        self.position = Some((x, y));
        self.consumed = false;
    }

    /// Returns the buffered position once, then `None` until the next `set`.
    pub fn take_if_unconsumed(&mut self) -> Option<(f64, f64)> {
        if self.consumed {
            return None;
        }
        self.consumed = true;
        self.position
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}
