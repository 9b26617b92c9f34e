use log::{debug, info};

use super::{
    MAX_ATTEMPTS, Outcome, RefetchPlan, VerificationReport, VerifyMode, VerifyParams,
    VerifyRequest,
};
use crate::config::Settings;
use crate::distance::{Thresholds, block_distance, classify};
use crate::error::{HashError, Result};
use crate::hash::{HexHash, normalize};
use crate::matching::find_matches;
use crate::offset::{ComplexOffset, derive_offset};
use crate::token::{TokenSet, validate_token_size};

/// Where refetched block hashes come from (an RPC client in production).
pub trait BlockHashSource {
    fn block_hash(&self, number: u64) -> Result<String>;
}

/// Runs NORMALIZE -> TOKENIZE -> MATCH -> CLASSIFY, plus the single
/// complex-mode refetch.
#[derive(Debug, Clone)]
pub struct Verifier {
    simple_thresholds: Thresholds,
    complex_thresholds: Thresholds,
    complex_modulus: u64,
    params: VerifyParams,
}

struct Attempt<'a> {
    mode: VerifyMode,
    guessed: &'a HexHash,
    fetched: &'a HexHash,
    target_block: u64,
    compared_block: u64,
    current_block: u64,
    number: u8,
    offset: Option<ComplexOffset>,
}

impl Verifier {
    pub fn new(settings: &Settings) -> Self {
        Self {
            simple_thresholds: settings.simple_thresholds,
            complex_thresholds: settings.complex_thresholds,
            complex_modulus: settings.complex_modulus,
            params: VerifyParams::from_settings(settings),
        }
    }

    /// Default form parameters.
    pub fn params(&self) -> VerifyParams {
        self.params
    }

    pub fn thresholds(&self, mode: VerifyMode) -> &Thresholds {
        match mode {
            VerifyMode::Simple => &self.simple_thresholds,
            VerifyMode::Complex => &self.complex_thresholds,
        }
    }

    pub fn verify(&self, req: &VerifyRequest) -> Result<Outcome> {
        self.verify_with(req, &self.params)
    }

    /// First attempt. In complex mode an unaccepted result turns into a
    /// `RefetchPlan` seeded by the fetched hash.
    pub fn verify_with(&self, req: &VerifyRequest, params: &VerifyParams) -> Result<Outcome> {
        validate_params(params)?;
        let guessed = normalize(&req.guessed_hash)?;
        let fetched = normalize(&req.fetched_hash)?;

        let report = self.compare(
            Attempt {
                mode: req.mode,
                guessed: &guessed,
                fetched: &fetched,
                target_block: req.target_block,
                compared_block: req.target_block,
                current_block: req.current_block,
                number: 1,
                offset: None,
            },
            params,
        )?;

        if req.mode == VerifyMode::Complex && !report.accepted {
            let offset = derive_offset(&fetched, req.target_block, self.complex_modulus)?;
            info!(
                "VERIFY - no acceptable match for block #{}, refetch #{} (byte=0x{:02x}, \
                 offset={})",
                req.target_block, offset.derived_block, offset.byte_value, offset.offset
            );
            return Ok(Outcome::Refetch(Box::new(RefetchPlan {
                guessed_hash: guessed,
                seed_hash: fetched,
                target_block: req.target_block,
                current_block: req.current_block,
                params: *params,
                offset,
                first_attempt: report,
            })));
        }

        info!(
            "VERIFY - settled block #{}: {} matches, bucket={:?}",
            report.compared_block,
            report.matches.len(),
            report.bucket
        );
        Ok(Outcome::Settled(report))
    }

    /// Second and final attempt against the hash of `plan.block_to_fetch()`.
    pub fn resume(&self, plan: &RefetchPlan, refetched_hash: &str) -> Result<VerificationReport> {
        let fetched = normalize(refetched_hash)?;
        let report = self.compare(
            Attempt {
                mode: VerifyMode::Complex,
                guessed: &plan.guessed_hash,
                fetched: &fetched,
                target_block: plan.target_block,
                compared_block: plan.offset.derived_block,
                current_block: plan.current_block,
                number: MAX_ATTEMPTS,
                offset: Some(plan.offset),
            },
            &plan.params,
        )?;
        info!(
            "VERIFY - settled derived block #{} (target #{}): {} matches, bucket={:?}",
            report.compared_block,
            report.target_block,
            report.matches.len(),
            report.bucket
        );
        Ok(report)
    }

    /// Pull the derived block's hash from `source` and finish the plan.
    pub fn resume_from<S: BlockHashSource + ?Sized>(
        &self,
        plan: &RefetchPlan,
        source: &S,
    ) -> Result<VerificationReport> {
        let hash = source.block_hash(plan.block_to_fetch())?;
        self.resume(plan, &hash)
    }

    /// Full loop with at most one refetch from `source`.
    pub fn run<S: BlockHashSource + ?Sized>(
        &self,
        req: &VerifyRequest,
        source: &S,
    ) -> Result<VerificationReport> {
        match self.verify(req)? {
            Outcome::Settled(report) => Ok(report),
            Outcome::Refetch(plan) => self.resume_from(&plan, source),
        }
    }

    fn compare(&self, attempt: Attempt<'_>, params: &VerifyParams) -> Result<VerificationReport> {
        let (size, mode) = (params.token_size, params.token_mode);
        let guessed = TokenSet::build(attempt.guessed.as_str(), size, mode)?;
        let fetched = TokenSet::build(attempt.fetched.as_str(), size, mode)?;
        let matches = find_matches(guessed.as_slice(), fetched.as_slice(), params.policy)?
            .limited(params.max_matches);
        debug!(
            "VERIFY - attempt {}: {} vs {} tokens ({} size={}), {} matches",
            attempt.number,
            guessed.len(),
            fetched.len(),
            params.token_mode,
            params.token_size,
            matches.len()
        );

        let distance = block_distance(attempt.compared_block, attempt.current_block);
        let bucket = classify(distance, self.thresholds(attempt.mode));

        Ok(VerificationReport {
            mode: attempt.mode,
            guessed_hash: attempt.guessed.clone(),
            fetched_hash: attempt.fetched.clone(),
            target_block: attempt.target_block,
            compared_block: attempt.compared_block,
            current_block: attempt.current_block,
            token_mode: params.token_mode,
            token_size: params.token_size,
            guessed_tokens: guessed.len(),
            fetched_tokens: fetched.len(),
            accepted: matches.len() >= params.min_matches,
            matches,
            distance,
            bucket,
            color: bucket.color().to_string(),
            attempts: attempt.number,
            offset: attempt.offset,
        })
    }
}

/// Per-request form values get the same bounds as the startup settings.
fn validate_params(params: &VerifyParams) -> Result<()> {
    validate_token_size(params.token_size)?;
    if params.max_matches == 0 {
        return Err(HashError::range("max_matches must be > 0"));
    }
    if params.min_matches > params.max_matches {
        return Err(HashError::range(format!(
            "min_matches {} exceeds max_matches {}",
            params.min_matches, params.max_matches
        )));
    }
    Ok(())
}
