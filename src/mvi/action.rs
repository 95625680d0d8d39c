/// Something a reducer can consume, such as "request started" or
/// "fetch settled".
pub trait Action: Send + 'static {}
