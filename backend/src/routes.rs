use rocket::{Build, Rocket, State, catchers, get, post, routes, http::Status, serde::json::Json};
use tracing::{debug, instrument};
use shared::{models::*, user_info::VoterInfo};
use crate::{
    catchers::{bad_request, forbidden, internal_error, not_found, unprocessable},
    error::ApiError,
    store::PollStore,
    utils::{links, parse_poll_id},
};

pub struct AppState {
    pub store: PollStore,
}

impl AppState {
    pub fn new(store: PollStore) -> Self {
        Self { store }
    }
}

/// The full service, ready to launch or to drive from a local client.
pub fn app(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount(
            "/",
            routes![
                ping,
                create_poll,
                vote_poll,
                get_poll,
                list_polls,
                poll_stats
            ],
        )
        .register(
            "/",
            catchers![
                bad_request,
                forbidden,
                not_found,
                unprocessable,
                internal_error
            ],
        )
}

#[get("/ping")]
pub fn ping() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "pong".into(),
        next: vec![links::list()],
    })
}

#[instrument(skip(state, request))]
#[post("/polls/create", format = "json", data = "<request>")]
pub async fn create_poll(
    state: &State<AppState>,
    request: Json<CreatePollRequest>,
) -> Result<(Status, Json<CreatedResponse>), ApiError> {
    let request = request.into_inner();
    let poll = state
        .store
        .create(&request.question, &request.options)
        .await
        .map_err(|e| ApiError::store(e, vec![links::create()]))?;

    Ok((
        Status::Created,
        Json(CreatedResponse {
            message: "poll created".into(),
            id: poll.id,
            next: vec![links::poll(poll.id), links::vote(poll.id), links::stats(poll.id)],
        }),
    ))
}

#[instrument(skip(state, request, voter), fields(poll_id = %id))]
#[post("/polls/<id>/vote", format = "json", data = "<request>")]
pub async fn vote_poll(
    state: &State<AppState>,
    id: &str,
    request: Json<VoteRequest>,
    voter: VoterInfo,
) -> Result<Json<MessageResponse>, ApiError> {
    let poll_id = parse_poll_id(id)?;
    debug!("Vote from {} for {:?}", voter.ip, request.option);

    state
        .store
        .vote(poll_id, &request.option, &voter.ip)
        .await
        .map_err(|e| ApiError::store(e, vec![links::poll(poll_id)]))?;

    Ok(Json(MessageResponse {
        message: "vote registered".into(),
        next: vec![links::poll(poll_id), links::stats(poll_id)],
    }))
}

#[get("/polls/<id>")]
pub async fn get_poll(state: &State<AppState>, id: &str) -> Result<Json<PollResponse>, ApiError> {
    let poll_id = parse_poll_id(id)?;
    let poll = state
        .store
        .get(poll_id)
        .await
        .map_err(|e| ApiError::store(e, vec![links::list()]))?;

    Ok(Json(PollResponse {
        poll,
        next: vec![links::vote(poll_id)],
    }))
}

#[get("/polls")]
pub async fn list_polls(state: &State<AppState>) -> Result<Json<PollListResponse>, ApiError> {
    let polls = state
        .store
        .list()
        .await
        .map_err(|e| ApiError::store(e, vec![links::create()]))?;

    Ok(Json(PollListResponse {
        polls,
        next: vec![links::create()],
    }))
}

#[get("/polls/<id>/stats")]
pub async fn poll_stats(state: &State<AppState>, id: &str) -> Result<Json<StatsResponse>, ApiError> {
    let poll_id = parse_poll_id(id)?;
    let (poll, PollStats { total_votes, votes, percent }) = state
        .store
        .stats(poll_id)
        .await
        .map_err(|e| ApiError::store(e, vec![links::list()]))?;

    Ok(Json(StatsResponse {
        poll_id: poll.id,
        question: poll.question,
        options: poll.options,
        votes,
        percent,
        total_votes,
        next: vec![links::poll(poll_id), links::vote(poll_id)],
    }))
}
