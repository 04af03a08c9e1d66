// JIT counter arithmetic
//
// A benchmark may report several counter records (one per repeated run).
// Ratios are computed over the element-wise sum of those records.

use crate::store::JitStatsRecord;

pub const EXEC_INSTRUCTION: &str = "exec_instruction";
pub const VM_INSNS_COUNT: &str = "vm_insns_count";
pub const EXIT_PREFIX: &str = "exit_";
pub const INLINE_CODE_SIZE: &str = "inline_code_size";
pub const OUTLINED_CODE_SIZE: &str = "outlined_code_size";
pub const COMPILED_ISEQ_COUNT: &str = "compiled_iseq_count";
pub const COMPILED_BLOCK_COUNT: &str = "compiled_block_count";
pub const INVALIDATION_COUNT: &str = "invalidation_count";

const ONE_MIB: u64 = 1024 * 1024;

/// Sum counters across repeated runs
pub fn combine(records: &[JitStatsRecord]) -> JitStatsRecord {
    let mut combined = JitStatsRecord::new();
    for record in records {
        for (name, value) in record {
            *combined.entry(name.clone()).or_insert(0) += value;
        }
    }
    combined
}

fn counter(record: &JitStatsRecord, name: &str) -> i64 {
    record.get(name).copied().unwrap_or(0)
}

/// Sum of every `exit_*` counter
pub fn total_exit_count(record: &JitStatsRecord) -> i64 {
    record
        .iter()
        .filter(|(name, _)| name.starts_with(EXIT_PREFIX))
        .map(|(_, value)| value)
        .sum()
}

/// Percentage of executed instructions retired inside the JIT tier
///
/// Plain float division: a record with no instructions at all yields NaN.
pub fn yjit_ratio_pct(record: &JitStatsRecord) -> f64 {
    let retired_in_jit = counter(record, EXEC_INSTRUCTION) - total_exit_count(record);
    let total_insns = retired_in_jit + counter(record, VM_INSNS_COUNT);
    100.0 * retired_in_jit as f64 / total_insns as f64
}

/// Byte count rounded up to whole MiB; a partially used region still costs a full one
pub fn ceil_mib(bytes: u64) -> u64 {
    bytes.div_ceil(ONE_MIB)
}

/// Code size and compilation counters for one benchmark
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JitSummary {
    pub inline_code_size: Option<i64>,
    pub outlined_code_size: Option<i64>,
    pub compiled_iseq_count: Option<i64>,
    pub compiled_block_count: Option<i64>,
    pub invalidation_count: Option<i64>,
}

impl JitSummary {
    pub fn from_record(record: &JitStatsRecord) -> Self {
        Self {
            inline_code_size: record.get(INLINE_CODE_SIZE).copied(),
            outlined_code_size: record.get(OUTLINED_CODE_SIZE).copied(),
            compiled_iseq_count: record.get(COMPILED_ISEQ_COUNT).copied(),
            compiled_block_count: record.get(COMPILED_BLOCK_COUNT).copied(),
            invalidation_count: record.get(INVALIDATION_COUNT).copied(),
        }
    }

    /// Invalidated blocks over compiled blocks
    pub fn invalidation_ratio(&self) -> Option<f64> {
        let invalidated = self.invalidation_count?;
        let compiled = self.compiled_block_count?;
        Some(invalidated as f64 / compiled as f64)
    }

    pub fn inline_code_mib(&self) -> Option<u64> {
        self.inline_code_size
            .and_then(|b| u64::try_from(b).ok())
            .map(ceil_mib)
    }

    pub fn outlined_code_mib(&self) -> Option<u64> {
        self.outlined_code_size
            .and_then(|b| u64::try_from(b).ok())
            .map(ceil_mib)
    }
}
