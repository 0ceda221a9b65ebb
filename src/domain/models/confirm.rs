/// Asks the user to approve a destructive operation before it is sent.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way. Used for `--yes` and in tests.
pub struct StaticConfirm(pub bool);

impl Confirm for StaticConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        return self.0;
    }
}
