use quotewall_cache::Status;
use quotewall_extract::models::Quote;
use quotewall_rotation::History;

/// The display side of the widget.
///
/// The core calls these as things happen; implementations render quotes,
/// show notifications and redraw the history list. None of them can fail
/// from the core's point of view.
pub trait Presenter {
    /// A quote should be displayed.
    fn on_quote_ready(&mut self, quote: &Quote);

    /// Something worth telling the user happened.
    fn on_status_change(&mut self, status: &Status);

    /// The history list changed (a new quote was shown, or it was cleared).
    fn on_history_changed(&mut self, history: &History);
}
