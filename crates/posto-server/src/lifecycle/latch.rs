//! One-shot halt latch

use super::Halt;
use tokio::sync::oneshot;

/// Carries the first halt decision to whoever waits on the receiver.
/// Every later trip is refused and the halt is handed back.
pub struct HaltLatch {
    sender: Option<oneshot::Sender<Halt>>,
}

impl HaltLatch {
    pub fn new() -> (Self, oneshot::Receiver<Halt>) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    pub fn is_tripped(&self) -> bool {
        self.sender.is_none()
    }

    pub fn trip(&mut self, halt: Halt) -> Result<(), Halt> {
        match self.sender.take() {
            Some(sender) => {
                // Nobody waiting means the process is already on its way out.
                let _ = sender.send(halt);
                Ok(())
            }
            None => Err(halt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_only_first_trip_is_delivered() {
        let (mut latch, receiver) = HaltLatch::new();
        assert!(!latch.is_tripped());

        assert!(latch.trip(Halt::Signal("SIGTERM")).is_ok());
        assert!(latch.is_tripped());

        let refused = latch.trip(Halt::Signal("SIGINT")).unwrap_err();
        assert!(matches!(refused, Halt::Signal("SIGINT")));

        assert!(matches!(receiver.await, Ok(Halt::Signal("SIGTERM"))));
    }

    #[test]
    fn test_trip_without_receiver() {
        let (mut latch, receiver) = HaltLatch::new();
        drop(receiver);
        assert!(latch.trip(Halt::Signal("SIGTERM")).is_ok());
        assert!(latch.is_tripped());
    }
}
