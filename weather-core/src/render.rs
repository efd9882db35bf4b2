//! Seam between the page controllers and whatever draws their state.

/// Receives every view state a controller moves through.
pub trait Render<S: ?Sized> {
    fn render(&mut self, state: &S);
}

/// Records each rendered state in order.
impl<S: Clone> Render<S> for Vec<S> {
    fn render(&mut self, state: &S) {
        self.push(state.clone());
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRender;

impl<S: ?Sized> Render<S> for NoRender {
    fn render(&mut self, _state: &S) {}
}
