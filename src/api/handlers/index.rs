use axum::response::Html;

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <title>Movie Recommender</title>
        <style>
            body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; }
            h1 { color: #333; }
            .endpoint { background-color: #f5f5f5; padding: 10px; border-radius: 5px; margin: 10px 0; }
        </style>
    </head>
    <body>
        <h1>Movie Recommender API</h1>
        <p>Recommends movies by clustering users on their ratings with k-means.</p>
        <h2>Endpoints</h2>
        <div class="endpoint">
            <strong>GET /recommend/{user_id}</strong>
            <p>Top 10 movies the user has not rated yet.</p>
            <p>Example: <a href="/recommend/1">/recommend/1</a></p>
        </div>
        <div class="endpoint">
            <strong>POST /api/ratings</strong>
            <p>Body: <code>{"userId": 1, "movieId": 2, "rating": 4.5}</code></p>
        </div>
    </body>
</html>
"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}
