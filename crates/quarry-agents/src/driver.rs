//! The agent side of the channel protocol.
//!
//! Read a perception, decide, answer with exactly one move request, repeat.
//! The loop ends cleanly when the coordinator closes the channel between
//! records.

use crate::policy::Policy;
use quarry_core::error::ProtocolError;
use quarry_core::wire::{MoveRequest, PerceptionMessage};
use rand::Rng;
use std::io::{Read, Write};
use std::thread;
use std::time::Duration;
use tracing::{debug, trace};

/// Random delay applied before each response.
///
/// The delay is `unit × k` for a uniformly drawn `k` in `1..=max_units`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jitter {
    pub unit: Duration,
    pub max_units: u32,
}

impl Jitter {
    /// The prey default: 10 ms to 90 ms in 10 ms steps.
    pub fn prey() -> Self {
        Self {
            unit: Duration::from_millis(10),
            max_units: 9,
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        self.unit * rng.gen_range(1..=self.max_units.max(1))
    }
}

/// Serve decisions for `policy` until the coordinator hangs up.
///
/// Returns the number of move requests sent.
pub fn run_agent<P, R, W>(
    policy: &P,
    reader: &mut R,
    writer: &mut W,
    jitter: Option<Jitter>,
) -> Result<u64, ProtocolError>
where
    P: Policy,
    R: Read,
    W: Write,
{
    let mut rng = rand::thread_rng();
    let mut decisions = 0u64;

    while let Some(perception) = PerceptionMessage::read_from(reader)? {
        let target = policy.decide(&perception);
        trace!(
            kind = %policy.kind(),
            position = %perception.position,
            adversary = %perception.adversary,
            blocked = perception.blocked().len(),
            "perception received"
        );
        if let Some(jitter) = jitter {
            thread::sleep(jitter.sample(&mut rng));
        }
        MoveRequest::new(target).write_to(writer)?;
        decisions += 1;
        debug!(kind = %policy.kind(), from = %perception.position, to = %target, "move requested");
    }

    debug!(kind = %policy.kind(), decisions, "channel closed");
    Ok(decisions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{HunterPolicy, PreyPolicy};
    use quarry_core::types::{Bounds, Coordinate};
    use std::io::Cursor;

    fn script(messages: &[PerceptionMessage]) -> Cursor<Vec<u8>> {
        let mut bytes = Vec::new();
        for m in messages {
            m.write_to(&mut bytes).unwrap();
        }
        Cursor::new(bytes)
    }

    fn requests(bytes: Vec<u8>) -> Vec<Coordinate> {
        let mut cursor = Cursor::new(bytes);
        let mut out = Vec::new();
        while let Some(req) = MoveRequest::read_from(&mut cursor).unwrap() {
            out.push(req.requested);
        }
        out
    }

    #[test]
    fn answers_every_perception_once() {
        let hunter = HunterPolicy::new(Bounds::new(5, 5));
        let mut input = script(&[
            PerceptionMessage::new(Coordinate::new(1, 1), Coordinate::new(3, 3)),
            PerceptionMessage::new(Coordinate::new(1, 2), Coordinate::new(3, 3)),
        ]);
        let mut output = Vec::new();

        let sent = run_agent(&hunter, &mut input, &mut output, None).unwrap();

        assert_eq!(sent, 2);
        assert_eq!(
            requests(output),
            vec![Coordinate::new(1, 2), Coordinate::new(1, 3)]
        );
    }

    #[test]
    fn truncated_perception_is_an_error() {
        let prey = PreyPolicy::new(Bounds::new(5, 5));
        let bytes = PerceptionMessage::new(Coordinate::new(2, 2), Coordinate::new(1, 1)).encode();
        let mut input = Cursor::new(bytes[..30].to_vec());
        let mut output = Vec::new();

        let err = run_agent(&prey, &mut input, &mut output, None).unwrap_err();
        assert!(matches!(err, ProtocolError::Truncated { got: 30, .. }));
        assert!(output.is_empty());
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let jitter = Jitter::prey();
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let d = jitter.sample(&mut rng);
            assert!(d >= Duration::from_millis(10));
            assert!(d <= Duration::from_millis(90));
            assert_eq!(d.as_millis() % 10, 0);
        }
    }

    #[test]
    fn prey_answers_after_jitter() {
        let prey = PreyPolicy::new(Bounds::new(7, 7));
        let mut input = script(&[PerceptionMessage::new(
            Coordinate::new(3, 3),
            Coordinate::new(1, 1),
        )]);
        let mut output = Vec::new();
        let jitter = Jitter {
            unit: Duration::from_millis(1),
            max_units: 2,
        };

        run_agent(&prey, &mut input, &mut output, Some(jitter)).unwrap();
        assert_eq!(requests(output), vec![Coordinate::new(3, 4)]);
    }
}
