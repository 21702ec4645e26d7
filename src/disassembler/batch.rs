//! Parallel decoding of many method bodies.

use log::debug;
use rayon::prelude::*;

use crate::{
    disassembler::{decode_stream_with, DecoderConfig, Instruction},
    Result,
};

/// Decodes every method body in `bodies` on the rayon thread pool.
///
/// Each body is decoded independently with its own decoder, so one malformed method does not
/// affect the others. The result has one entry per body, in input order.
///
/// # Examples
///
/// ```rust
/// use cilscan::disassembler::{decode_methods, DecoderConfig};
///
/// let bodies: [&[u8]; 3] = [&[0x00, 0x2A], &[0x24], &[0x2A]];
/// let results = decode_methods(&bodies, &DecoderConfig::default());
///
/// assert_eq!(results.len(), 3);
/// assert_eq!(results[0].as_ref().map(Vec::len), Ok(2));
/// assert!(results[1].is_err());
/// ```
pub fn decode_methods<'a, B>(
    bodies: &'a [B],
    config: &DecoderConfig,
) -> Vec<Result<Vec<Instruction<'a>>>>
where
    B: AsRef<[u8]> + Sync,
{
    let results: Vec<_> = bodies
        .par_iter()
        .map(|body| decode_stream_with(body.as_ref(), config))
        .collect();

    let failed = results.iter().filter(|result| result.is_err()).count();
    debug!(
        "Decoded {} method bodies, {} failed",
        results.len(),
        failed
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{disassembler::decode_stream, Error};

    #[test]
    fn matches_sequential_decoding() {
        let bodies: Vec<Vec<u8>> = (0..64u8)
            .map(|i| {
                let mut body = vec![0x00; usize::from(i % 7)];
                if i % 5 == 0 {
                    body.push(0xFE);
                } else {
                    body.push(0x2A);
                }
                body
            })
            .collect();

        let parallel = decode_methods(&bodies, &DecoderConfig::default());
        assert_eq!(parallel.len(), bodies.len());

        for (body, result) in bodies.iter().zip(&parallel) {
            assert_eq!(*result, decode_stream(body));
        }
    }

    #[test]
    fn applies_config_per_body() {
        let bodies = [vec![0x00, 0x00, 0x2A], vec![0x2A]];
        let config = DecoderConfig::default().with_max_instructions(2);

        let results = decode_methods(&bodies, &config);
        assert!(matches!(
            results[0],
            Err(Error::InstructionLimit { offset: 2, .. })
        ));
        assert_eq!(results[1].as_ref().map(Vec::len), Ok(1));
    }

    #[test]
    fn empty_input() {
        let bodies: [&[u8]; 0] = [];
        assert!(decode_methods(&bodies, &DecoderConfig::default()).is_empty());
    }
}
