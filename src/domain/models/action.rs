use super::RemixPrompt;

pub enum Action {
    BackendAbort(),
    BackendRequest(RemixPrompt),
}
