pub mod quiz;
pub mod score;

use crate::actix_web::{
    cookie::Cookie,
    web::{delete, get, post, put, scope, Data, Json, JsonConfig, PathConfig, QueryConfig, ServiceConfig},
    HttpResponse,
};
use crate::config::AuthSettings;
use crate::core::models::user::{Login, Signup};
use crate::core::ports::repository::Manager;
use crate::core::services::user;
use crate::core::tokener::Tokener;
use crate::error::Error;
use crate::impls::tokener::jwt::JWT;
use crate::middlewares::jwt::{Claim, JWTMiddleware, JWT_TOKEN};
use crate::response::{Created, Token};

pub async fn signup<M: Manager>(Json(form): Json<Signup>, manager: Data<M>, settings: Data<AuthSettings>) -> Result<HttpResponse, Error> {
    let tx = manager.tx().await?;
    let id = user::signup(tx, form, settings.admin_code.as_deref()).await?;
    Ok(HttpResponse::Created().json(Created { id }))
}

pub async fn login<M: Manager>(Json(form): Json<Login>, manager: Data<M>, settings: Data<AuthSettings>) -> Result<HttpResponse, Error> {
    let mut store = manager.db().await?;
    let u = user::authenticate(&mut store, form).await?;
    let tokener = JWT::new(settings.jwt_secret.clone());
    let token = tokener.gen_token(&Claim::new(u.id, u.is_admin))?;
    Ok(HttpResponse::Ok().cookie(Cookie::new(JWT_TOKEN, token.clone())).json(Token { token }))
}

/// Registers every route against the given store manager.
pub fn configure<M>(manager: M, settings: AuthSettings) -> impl FnOnce(&mut ServiceConfig)
where
    M: Manager + 'static,
{
    move |cfg: &mut ServiceConfig| {
        let secret = settings.jwt_secret.clone();
        cfg.app_data(Data::new(manager))
            .app_data(Data::new(settings))
            .app_data(JsonConfig::default().error_handler(|err, _| Error::Validation(err.to_string()).into()))
            .app_data(QueryConfig::default().error_handler(|err, _| Error::Validation(err.to_string()).into()))
            .app_data(PathConfig::default().error_handler(|err, _| Error::Validation(err.to_string()).into()))
            .route("/signup", post().to(signup::<M>))
            .route("/login", post().to(login::<M>))
            .service(
                scope("")
                    .wrap(JWTMiddleware::new(secret))
                    .route("/quizzes", post().to(quiz::create::<M>))
                    .route("/quizzes/{id}", get().to(quiz::detail::<M>))
                    .route("/get-quizzes", get().to(quiz::list::<M>))
                    .route("/update/{id}", put().to(quiz::update::<M>))
                    .route("/delete/{id}", delete().to(quiz::delete::<M>))
                    .route("/update-score", post().to(score::update_score::<M>))
                    .route("/users/{id}/result", get().to(score::result::<M>))
                    .route("/company", get().to(score::company::<M>))
                    .route("/submit/{flow}", post().to(score::submit::<M>)),
            );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::actix_web::{
        http::{header::AUTHORIZATION, StatusCode},
        test::{call_service, init_service, read_body_json, TestRequest},
        App,
    };
    use crate::core::models::user::Insert as UserInsert;
    use crate::core::ports::repository::{QuizCommon, UserCommon};
    use crate::database::memory::MemoryManager;
    use serde_json::{json, Value};

    const SECRET: &[u8] = b"test-secret";

    fn settings() -> AuthSettings {
        AuthSettings {
            jwt_secret: SECRET.to_vec(),
            admin_code: Some("letmein".into()),
        }
    }

    fn bearer(id: i32, admin: bool) -> (actix_web::http::header::HeaderName, String) {
        let token = JWT::new(SECRET.to_vec()).gen_token(&Claim::new(id, admin)).unwrap();
        (AUTHORIZATION, format!("Bearer {}", token))
    }

    async fn seed_user(manager: &MemoryManager, name: &str, is_admin: bool) -> i32 {
        let mut store = manager.db().await.unwrap();
        UserCommon::insert(
            &mut store,
            UserInsert {
                username: name.into(),
                password: "-".into(),
                salt: "-".into(),
                is_admin,
            },
        )
        .await
        .unwrap()
    }

    fn quiz_body(question: &str, correct: i64, category: &str) -> Value {
        json!({
            "question": question,
            "answers": ["a", "b", "c", "d", "e"],
            "correctAnswerIndex": correct,
            "category": category,
        })
    }

    fn create(admin: i32, body: Value) -> TestRequest {
        TestRequest::post().uri("/quizzes").insert_header(bearer(admin, true)).set_json(body)
    }

    #[actix_web::test]
    async fn test_quiz_crud() {
        let manager = MemoryManager::default();
        let admin = seed_user(&manager, "admin", true).await;
        let app = init_service(App::new().configure(configure(manager.clone(), settings()))).await;

        let resp = call_service(&app, create(admin, quiz_body("What is the capital of Italy?", 1, "Main")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = read_body_json(resp).await;
        let id = body["quiz"]["id"].as_i64().unwrap();
        assert_eq!(body["quiz"]["correctAnswerIndex"], 1);
        assert_eq!(body["quiz"]["category"], "Main");

        let req = TestRequest::get().uri(&format!("/quizzes/{}", id)).insert_header(bearer(admin, true)).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let fetched: Value = read_body_json(resp).await;
        assert_eq!(fetched["quiz"], body["quiz"]);

        let req = TestRequest::put()
            .uri(&format!("/update/{}", id))
            .insert_header(bearer(admin, true))
            .set_json(quiz_body("What is the capital of Chile?", 2, "Secondary"))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: Value = read_body_json(resp).await;
        assert_eq!(updated["quiz"]["category"], "Secondary");
        assert_eq!(updated["quiz"]["createdAt"], body["quiz"]["createdAt"]);

        let req = TestRequest::delete().uri(&format!("/delete/{}", id)).insert_header(bearer(admin, true)).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);
        let req = TestRequest::delete().uri(&format!("/delete/{}", id)).insert_header(bearer(admin, true)).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["message"], "quiz not found");
        let req = TestRequest::get().uri(&format!("/quizzes/{}", id)).insert_header(bearer(admin, true)).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_validation_rejected() {
        let manager = MemoryManager::default();
        let admin = seed_user(&manager, "admin", true).await;
        let app = init_service(App::new().configure(configure(manager.clone(), settings()))).await;

        let mut four = quiz_body("q", 0, "Main");
        four["answers"] = json!(["a", "b", "c", "d"]);
        let resp = call_service(&app, create(admin, four).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().contains("5 answers"));

        assert_eq!(call_service(&app, create(admin, quiz_body("q", 5, "Main")).to_request()).await.status(), StatusCode::BAD_REQUEST);
        assert_eq!(call_service(&app, create(admin, json!({"question": "q"})).to_request()).await.status(), StatusCode::BAD_REQUEST);
        assert_eq!(call_service(&app, create(admin, json!({"question": 3})).to_request()).await.status(), StatusCode::BAD_REQUEST);

        let mut store = manager.db().await.unwrap();
        assert_eq!(QuizCommon::count(&mut store).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_auth_required() {
        let manager = MemoryManager::default();
        let uid = seed_user(&manager, "user", false).await;
        let app = init_service(App::new().configure(configure(manager.clone(), settings()))).await;

        let resp = call_service(&app, TestRequest::get().uri("/get-quizzes").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let req = TestRequest::post().uri("/quizzes").insert_header(bearer(uid, false)).set_json(quiz_body("q", 0, "Main")).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
        let req = TestRequest::get().uri("/get-quizzes").insert_header((AUTHORIZATION, "Bearer garbage")).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_list_filters() {
        let manager = MemoryManager::default();
        let admin = seed_user(&manager, "admin", true).await;
        let app = init_service(App::new().configure(configure(manager.clone(), settings()))).await;
        call_service(&app, create(admin, quiz_body("Capital of Japan?", 0, "Main")).to_request()).await;
        call_service(&app, create(admin, quiz_body("Boiling point of water?", 0, "Main")).to_request()).await;
        call_service(&app, create(admin, quiz_body("Capacity of a byte?", 0, "Secondary")).to_request()).await;
        call_service(&app, create(admin, quiz_body("Speed of light?", 0, "Third")).to_request()).await;

        let list = |uri: &'static str| TestRequest::get().uri(uri).insert_header(bearer(admin, true)).to_request();
        let body: Value = read_body_json(call_service(&app, list("/get-quizzes?category=Main")).await).await;
        assert_eq!(body["quizzes"].as_array().unwrap().len(), 2);

        let body: Value = read_body_json(call_service(&app, list("/get-quizzes?searchTerm=CAP")).await).await;
        let questions: Vec<&str> = body["quizzes"].as_array().unwrap().iter().map(|q| q["question"].as_str().unwrap()).collect();
        assert_eq!(questions, vec!["Capital of Japan?", "Capacity of a byte?"]);

        let body: Value = read_body_json(call_service(&app, list("/get-quizzes?category=Secondary&category=Third")).await).await;
        assert_eq!(body["quizzes"].as_array().unwrap().len(), 2);

        let body: Value = read_body_json(call_service(&app, list("/get-quizzes?searchTerm=nothing")).await).await;
        assert!(body["quizzes"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_score_routing() {
        let manager = MemoryManager::default();
        let uid = seed_user(&manager, "user", false).await;
        let other = seed_user(&manager, "other", false).await;
        let app = init_service(App::new().configure(configure(manager.clone(), settings()))).await;

        let score = |value: f64| TestRequest::post().uri("/update-score").insert_header(bearer(uid, false)).set_json(json!({"userId": uid, "score": value})).to_request();
        let result = || TestRequest::get().uri(&format!("/users/{}/result", uid)).insert_header(bearer(uid, false)).to_request();
        let company = || TestRequest::get().uri("/company").insert_header(bearer(uid, false)).to_request();

        let body: Value = read_body_json(call_service(&app, result()).await).await;
        assert_eq!(body["destination"], "mainQuiz");
        assert_eq!(body["result"], Value::Null);

        assert_eq!(call_service(&app, score(46.0)).await.status(), StatusCode::OK);
        let body: Value = read_body_json(call_service(&app, result()).await).await;
        assert_eq!(body["destination"], "company");
        assert_eq!(call_service(&app, company()).await.status(), StatusCode::OK);

        assert_eq!(call_service(&app, score(45.0)).await.status(), StatusCode::OK);
        let body: Value = read_body_json(call_service(&app, result()).await).await;
        assert_eq!(body["destination"], "training");
        assert_eq!(body["result"], 45.0);
        assert_eq!(call_service(&app, company()).await.status(), StatusCode::FORBIDDEN);

        let req = TestRequest::post().uri("/update-score").insert_header(bearer(uid, false)).set_json(json!({"userId": other, "score": 90})).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
        let req = TestRequest::post().uri("/update-score").insert_header(bearer(1000, true)).set_json(json!({"userId": 999, "score": 90})).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
        let req = TestRequest::post().uri("/update-score").insert_header(bearer(uid, false)).set_json(json!({"userId": uid, "score": 101})).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_submit_flow() {
        let manager = MemoryManager::default();
        let admin = seed_user(&manager, "admin", true).await;
        let uid = seed_user(&manager, "user", false).await;
        let app = init_service(App::new().configure(configure(manager.clone(), settings()))).await;
        let mut ids = vec![];
        for (q, c) in [("m1", "Main"), ("m2", "Main"), ("m3", "Main")] {
            let body: Value = read_body_json(call_service(&app, create(admin, quiz_body(q, 2, c)).to_request()).await).await;
            ids.push(body["quiz"]["id"].as_i64().unwrap());
        }
        let answers = json!({ "answers": { ids[0].to_string(): 2, ids[1].to_string(): 2 } });
        let req = TestRequest::post().uri("/submit/main").insert_header(bearer(uid, false)).set_json(answers).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["score"]["correctCount"], 2);
        assert_eq!(body["score"]["totalQuestions"], 3);
        assert_eq!(body["persisted"], true);
        assert_eq!(body["destination"], "company");

        let req = TestRequest::post().uri("/submit/bogus").insert_header(bearer(uid, false)).set_json(json!({"answers": {}})).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_submit_training_flow() {
        let manager = MemoryManager::default();
        let admin = seed_user(&manager, "admin", true).await;
        let uid = seed_user(&manager, "user", false).await;
        let app = init_service(App::new().configure(configure(manager.clone(), settings()))).await;
        let mut ids = vec![];
        for (q, c) in [("s1", "Secondary"), ("s2", "Secondary"), ("t1", "Third"), ("m1", "Main")] {
            let body: Value = read_body_json(call_service(&app, create(admin, quiz_body(q, 1, c)).to_request()).await).await;
            ids.push(body["quiz"]["id"].as_i64().unwrap());
        }
        let answers = json!({ "answers": { ids[0].to_string(): 1, ids[2].to_string(): 3, ids[3].to_string(): 1 } });
        let req = TestRequest::post().uri("/submit/training").insert_header(bearer(uid, false)).set_json(answers).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["score"]["correctCount"], 1);
        assert_eq!(body["score"]["totalQuestions"], 2);
        assert_eq!(body["score"]["percentage"], 50.0);
        assert_eq!(body["persisted"], false);
        assert_eq!(body["destination"], "company");
        let review = body["review"].as_array().unwrap();
        assert_eq!(review.len(), 2);
        assert_eq!(review[0]["quizId"], ids[0]);
        assert_eq!(review[0]["isCorrect"], true);
        assert_eq!(review[1]["isCorrect"], false);
        assert_eq!(review[1]["correctAnswerText"], "b");

        let req = TestRequest::get().uri(&format!("/users/{}/result", uid)).insert_header(bearer(uid, false)).to_request();
        let body: Value = read_body_json(call_service(&app, req).await).await;
        assert_eq!(body["result"], Value::Null);
        assert_eq!(body["destination"], "mainQuiz");
    }

    #[actix_web::test]
    async fn test_submit_main_when_store_read_only() {
        let manager = MemoryManager::default();
        let admin = seed_user(&manager, "admin", true).await;
        let uid = seed_user(&manager, "user", false).await;
        let app = init_service(App::new().configure(configure(manager.clone(), settings()))).await;
        let body: Value = read_body_json(call_service(&app, create(admin, quiz_body("m1", 0, "Main")).to_request()).await).await;
        let id = body["quiz"]["id"].as_i64().unwrap();
        manager.set_writable(false);

        let answers = json!({ "answers": { id.to_string(): 0 } });
        let req = TestRequest::post().uri("/submit/main").insert_header(bearer(uid, false)).set_json(answers).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["score"]["percentage"], 100.0);
        assert_eq!(body["persisted"], false);
        assert!(body["error"].as_str().unwrap().contains("read-only"));

        let mut store = manager.db().await.unwrap();
        assert_eq!(UserCommon::get(&mut store, uid).await.unwrap().unwrap().result, None);
    }

    #[actix_web::test]
    async fn test_malformed_path() {
        let manager = MemoryManager::default();
        let app = init_service(App::new().configure(configure(manager.clone(), settings()))).await;
        let req = TestRequest::get().uri("/quizzes/abc").insert_header(bearer(1, false)).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_body_json(resp).await;
        assert!(body["message"].is_string());
    }

    #[actix_web::test]
    async fn test_storage_error() {
        let manager = MemoryManager::default();
        let app = init_service(App::new().configure(configure(manager.clone(), settings()))).await;
        manager.set_available(false);
        let req = TestRequest::get().uri("/get-quizzes").insert_header(bearer(1, false)).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().starts_with("storage error"));
    }

    #[actix_web::test]
    async fn test_signup_login() {
        let manager = MemoryManager::default();
        let app = init_service(App::new().configure(configure(manager.clone(), settings()))).await;
        let req = TestRequest::post().uri("/signup").set_json(json!({"username": "ann", "password": "pw", "adminCode": "letmein"})).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::CREATED);
        let req = TestRequest::post().uri("/login").set_json(json!({"username": "ann", "password": "nope"})).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
        let req = TestRequest::post().uri("/login").set_json(json!({"username": "ann", "password": "pw"})).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = read_body_json(resp).await;
        let token = body["token"].as_str().unwrap().to_owned();
        let req = TestRequest::post().uri("/quizzes").insert_header((AUTHORIZATION, token)).set_json(quiz_body("q", 0, "Main")).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::CREATED);
    }
}
