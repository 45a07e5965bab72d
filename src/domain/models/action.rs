use super::Exchange;

#[derive(Debug)]
pub enum Action {
    BackendRequest(Exchange),
}
