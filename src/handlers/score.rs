use crate::actix_web::web::{Data, Json, Path};
use crate::context::UserInfo;
use crate::core::flow::Flow;
use crate::core::ports::repository::Manager;
use crate::core::routing::Destination;
use crate::core::services::score::{self, Standing, Submission};
use crate::error::Error;
use crate::request::{SubmitAnswers, UpdateScore};
use crate::response::Message;

pub async fn update_score<M: Manager>(me: UserInfo, Json(UpdateScore { user_id, score }): Json<UpdateScore>, manager: Data<M>) -> Result<Json<Message>, Error> {
    if !me.may_act_for(user_id) {
        return Err(Error::Forbidden);
    }
    let mut store = manager.db().await?;
    score::submit_score(&mut store, user_id, score).await?;
    Ok(Json(Message {
        message: "Score updated successfully!",
    }))
}

pub async fn result<M: Manager>(me: UserInfo, user_id: Path<i32>, manager: Data<M>) -> Result<Json<Standing>, Error> {
    let user_id = user_id.into_inner();
    if !me.may_act_for(user_id) {
        return Err(Error::Forbidden);
    }
    let mut store = manager.db().await?;
    Ok(Json(score::standing(&mut store, user_id).await?))
}

pub async fn company<M: Manager>(me: UserInfo, manager: Data<M>) -> Result<Json<Message>, Error> {
    let mut store = manager.db().await?;
    if score::standing(&mut store, me.id).await?.destination != Destination::Company {
        return Err(Error::Forbidden);
    }
    Ok(Json(Message {
        message: "Congratulations! You scored above 45%.",
    }))
}

pub async fn submit<M: Manager>(me: UserInfo, flow: Path<String>, Json(SubmitAnswers { answers }): Json<SubmitAnswers>, manager: Data<M>) -> Result<Json<Submission>, Error> {
    let flow = flow.into_inner();
    let flow: Flow = flow.parse()?;
    let mut store = manager.db().await?;
    Ok(Json(score::submit_flow(&mut store, me.id, flow, &answers).await?))
}
