use actix_web::{HttpResponse, Responder, post, web};
use chrono::Utc;
use log::{debug, info, warn};
use std::collections::HashMap;
use uuid::Uuid;

use super::bad_request;
use super::models::{
    AppState, PendingVerification, ResumeRequest, VerifyBody, VerifyResponse, VerifyStats,
};
use crate::error::{HashError, Result};
use crate::verify::{BlockHashSource, Outcome, VerifyParams};

/// The hash a caller posted for the block the plan asked for.
struct SuppliedBlock<'a> {
    number: Option<u64>,
    hash: &'a str,
}

impl BlockHashSource for SuppliedBlock<'_> {
    fn block_hash(&self, number: u64) -> Result<String> {
        match self.number {
            Some(given) if given != number => Err(HashError::range(format!(
                "hash supplied for block #{given}, expected #{number}"
            ))),
            _ => Ok(self.hash.to_string()),
        }
    }
}

/// Run the pipeline on a guessed hash and the caller-fetched target block hash.
/// Complex-mode misses are parked under a `verification_id` until the caller
/// posts the hash of `fetch_block` to `/verify/resume/`.
#[post("/verify/")]
pub async fn post_verify(
    state: web::Data<AppState>,
    body: web::Json<VerifyBody>,
) -> impl Responder {
    let body = body.into_inner();
    let params = merge_params(state.verifier.params(), &body);
    debug!(
        "POST /verify/ - target=#{} current=#{} mode={:?} size={} tokenizer={}",
        body.request.target_block,
        body.request.current_block,
        body.request.mode,
        params.token_size,
        params.token_mode
    );

    let outcome = match state.verifier.verify_with(&body.request, &params) {
        Ok(outcome) => outcome,
        Err(e) => return bad_request("POST /verify/", e),
    };
    let now = Utc::now().timestamp();

    match outcome {
        Outcome::Settled(report) => {
            state.stats.lock().expect("mutex poisoned").record(&report, now);
            HttpResponse::Ok().json(VerifyResponse::Settled { report })
        }
        Outcome::Refetch(plan) => {
            let verification_id = Uuid::new_v4().to_string();
            let fetch_block = plan.block_to_fetch();
            let offset = plan.offset;
            let first_attempt = plan.first_attempt.clone();
            {
                let mut pending = state.pending.lock().expect("mutex poisoned");
                let mut stats = state.stats.lock().expect("mutex poisoned");
                prune_expired(&mut pending, &mut stats, now, state.settings.pending_ttl_secs);
                pending.insert(
                    verification_id.clone(),
                    PendingVerification {
                        plan: *plan,
                        created_at: now,
                    },
                );
                stats.refetches_requested += 1;
                debug!("POST /verify/ - pending verifications: {}", pending.len());
            }
            info!("POST /verify/ - {verification_id} waiting for block #{fetch_block}");
            HttpResponse::Ok().json(VerifyResponse::Refetch {
                verification_id,
                fetch_block,
                offset,
                expires_at: now + state.settings.pending_ttl_secs,
                first_attempt,
            })
        }
    }
}

/// Finish a pending complex-mode verification. Each id resolves once.
#[post("/verify/resume/")]
pub async fn post_resume(
    state: web::Data<AppState>,
    body: web::Json<ResumeRequest>,
) -> impl Responder {
    let now = Utc::now().timestamp();
    let mut pending = state.pending.lock().expect("mutex poisoned");
    let mut stats = state.stats.lock().expect("mutex poisoned");
    prune_expired(&mut pending, &mut stats, now, state.settings.pending_ttl_secs);

    let Some(entry) = pending.get(&body.verification_id) else {
        warn!(
            "POST /verify/resume/ - unknown or expired id {}",
            body.verification_id
        );
        return HttpResponse::NotFound().body("unknown or expired verification_id");
    };

    let supplied = SuppliedBlock {
        number: body.block_number,
        hash: &body.fetched_hash,
    };
    match state.verifier.resume_from(&entry.plan, &supplied) {
        Ok(report) => {
            pending.remove(&body.verification_id);
            stats.resumed += 1;
            stats.record(&report, now);
            HttpResponse::Ok().json(VerifyResponse::Settled { report })
        }
        // keep the entry so the caller can retry with the right hash
        Err(e) => bad_request("POST /verify/resume/", e),
    }
}

fn merge_params(defaults: VerifyParams, body: &VerifyBody) -> VerifyParams {
    VerifyParams {
        token_size: body.token_size.unwrap_or(defaults.token_size),
        token_mode: body.token_mode.unwrap_or(defaults.token_mode),
        policy: body.policy.unwrap_or(defaults.policy),
        max_matches: body.max_matches.unwrap_or(defaults.max_matches),
        min_matches: body.min_matches.unwrap_or(defaults.min_matches),
    }
}

fn prune_expired(
    pending: &mut HashMap<String, PendingVerification>,
    stats: &mut VerifyStats,
    now: i64,
    ttl_secs: i64,
) {
    let before = pending.len();
    pending.retain(|_, p| now - p.created_at < ttl_secs);
    let removed = before - pending.len();
    if removed > 0 {
        stats.expired += removed as u64;
        debug!("pending verifications pruned: {before} -> {}", pending.len());
    }
}
