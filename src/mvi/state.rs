/// State owned by a reducer.
///
/// `Default` is the state before any action; drivers rely on it to move the
/// current state out with `mem::take`. `PartialEq` lets callers tell whether
/// a dispatch changed anything.
pub trait ViewState: Clone + PartialEq + Default + Send + 'static {}
