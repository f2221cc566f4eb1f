use axum::response::Html;

const UPLOAD_FORM: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Resume Matcher</title>
</head>
<body>
  <h1>Compare a resume with a job description</h1>
  <form action="/compare/" method="post" enctype="multipart/form-data">
    <p><label>Resume <input type="file" name="resume" accept=".pdf,.docx,.txt,.md" required></label></p>
    <p><label>Job description <input type="file" name="job_description" accept=".pdf,.docx,.txt,.md" required></label></p>
    <p><button type="submit">Compare</button></p>
  </form>
</body>
</html>
"#;

/// GET /
/// Minimal upload form posting both files to `/compare/`.
pub async fn upload_form_handler() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}
