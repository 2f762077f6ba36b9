use axum::response::Html;

const FORM: &str = include_str!("../../../assets/index.html");

#[allow(clippy::unused_async)]
pub async fn show() -> Html<&'static str> {
    Html(FORM)
}
