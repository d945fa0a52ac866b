use axum::response::{Html, Json};
use serde_json::{json, Value};

// Page shells only: the marketing content and the back-office UI are
// rendered client-side and are not part of this service's scope. The shells
// exist so the session gate has real page routes to guard.

pub(crate) async fn healthz_handler() -> Json<Value> {
    Json(json!({"ok": true}))
}

pub(crate) async fn index_page() -> Html<&'static str> {
    Html(
        "<!doctype html>\n<html lang=\"pt-BR\">\n<head><meta charset=\"utf-8\">\
         <title>Perícias de Engenharia</title></head>\n<body>\n\
         <h1>Perícias de Engenharia</h1>\n\
         <p>Assistência técnica e perícias judiciais.</p>\n\
         <p><a href=\"/processes\">Área restrita</a></p>\n\
         </body>\n</html>\n",
    )
}

pub(crate) async fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html>\n<html lang=\"pt-BR\">\n<head><meta charset=\"utf-8\">\
         <title>Entrar</title></head>\n<body>\n\
         <h1>Entrar</h1>\n\
         <form id=\"login\">\n\
         <label>Usuário <input name=\"username\" autocomplete=\"username\"></label>\n\
         <label>Senha <input name=\"password\" type=\"password\" autocomplete=\"current-password\"></label>\n\
         <button type=\"submit\">Entrar</button>\n\
         </form>\n\
         <script>\n\
         document.getElementById('login').addEventListener('submit', async (event) => {\n\
           event.preventDefault();\n\
           const form = new FormData(event.target);\n\
           const res = await fetch('/api/login', {\n\
             method: 'POST',\n\
             headers: {'Content-Type': 'application/json'},\n\
             body: JSON.stringify({username: form.get('username'), password: form.get('password')}),\n\
           });\n\
           if (res.ok) {\n\
             const params = new URLSearchParams(window.location.search);\n\
             window.location.assign(params.get('returnTo') || '/processes');\n\
           }\n\
         });\n\
         </script>\n\
         </body>\n</html>\n",
    )
}

pub(crate) async fn processes_page() -> Html<&'static str> {
    Html(
        "<!doctype html>\n<html lang=\"pt-BR\">\n<head><meta charset=\"utf-8\">\
         <title>Processos</title></head>\n<body>\n\
         <h1>Processos</h1>\n\
         <div id=\"app\" data-endpoint=\"/api/processes\"></div>\n\
         </body>\n</html>\n",
    )
}

pub(crate) async fn process_detail_page() -> Html<&'static str> {
    Html(
        "<!doctype html>\n<html lang=\"pt-BR\">\n<head><meta charset=\"utf-8\">\
         <title>Processo</title></head>\n<body>\n\
         <h1>Processo</h1>\n\
         <div id=\"app\" data-endpoint=\"/api/processes\"></div>\n\
         </body>\n</html>\n",
    )
}
