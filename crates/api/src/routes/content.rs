//! Marketing content for the home and about pages.

use axum::{Json, extract::State};

use crate::content::{AboutUs, FinalCta, HowItWorks, Stats, WhyChoose};
use crate::state::AppState;

/// GET /api/stats
pub async fn stats(State(state): State<AppState>) -> Json<Stats> {
    Json(state.content().stats.clone())
}

/// GET /api/why-choose
pub async fn why_choose(State(state): State<AppState>) -> Json<Vec<WhyChoose>> {
    Json(state.content().why_choose.clone())
}

/// GET /api/how-it-works
pub async fn how_it_works(State(state): State<AppState>) -> Json<Vec<HowItWorks>> {
    Json(state.content().how_it_works.clone())
}

/// GET /api/final-cta
pub async fn final_cta(State(state): State<AppState>) -> Json<FinalCta> {
    Json(state.content().final_cta.clone())
}

/// GET /api/aboutus
pub async fn about_us(State(state): State<AppState>) -> Json<AboutUs> {
    Json(state.content().about_us.clone())
}
