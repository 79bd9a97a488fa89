use super::chunker::*;

/// Emits growing prefixes of the input: `step`, `2 * step`, ... and finally the
/// whole input.
pub struct PrefixChunker {
    step: usize,
    // always append the whole input again after the last step
    legacy_duplicate_final_chunk: bool,
}

impl PrefixChunker {
    pub fn new(step: usize) -> Result<PrefixChunker, ChunkerError> {
        if step == 0 {
            return Err(ChunkerError::InvalidArgument("step size must be positive"));
        }

        Ok(PrefixChunker {
            step,
            legacy_duplicate_final_chunk: true,
        })
    }

    pub fn legacy_duplicate_final_chunk(mut self, enabled: bool) -> PrefixChunker {
        self.legacy_duplicate_final_chunk = enabled;
        self
    }

    pub fn step(&self) -> usize {
        self.step
    }

    fn prefix_lengths(&self, len: usize) -> Vec<usize> {
        if len == 0 {
            return vec![];
        }

        // cursor over multiples of step, zero offset skipped
        let mut lengths: Vec<usize> = (self.step..=len).step_by(self.step).collect();
        if lengths.is_empty() {
            // step is larger than the whole input
            lengths.push(len);
        }

        if self.legacy_duplicate_final_chunk || lengths.last() != Some(&len) {
            lengths.push(len);
        }
        lengths
    }
}

impl Chunker for PrefixChunker {
    fn chunk<'a>(&self, data: &'a [u8]) -> Vec<&'a [u8]> {
        self.prefix_lengths(data.len())
            .into_iter()
            .map(|end| &data[..end])
            .collect()
    }
}
