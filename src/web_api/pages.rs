//! Server-rendered HTML for the session surface.
//!
//! Pages are deliberately plain: forms post back to the same path and the
//! task page is a shell that drives the JSON API from `/static/tasks.js`.

use axum::response::Html;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::{data_access::task_filter::AdminTaskFilter, field_errors::FieldErrors, task::Task, user::User};

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = text(title),
    ))
}

fn logout_form() -> &'static str {
    "<form method=\"post\" action=\"/logout/\"><button type=\"submit\">Log out</button></form>"
}

fn error_list(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|message| format!("<li>{}</li>", text(message)))
        .collect();
    format!("<ul class=\"errorlist\">{items}</ul>")
}

pub fn home(user: Option<&User>) -> Html<String> {
    let body = match user {
        Some(user) => format!(
            "<h1>To-do</h1>\n<p>Signed in as {}.</p>\n<p><a href=\"/tasks/\">Open your tasks</a></p>\n{}",
            text(&user.username),
            logout_form(),
        ),
        None => "<h1>To-do</h1>\n<p><a href=\"/login/\">Log in</a> or <a href=\"/signup/\">sign up</a>.</p>"
            .to_string(),
    };
    layout("To-do", &body)
}

pub fn login(error: Option<&str>, username: &str) -> Html<String> {
    let error = error
        .map(|message| format!("<p class=\"errornote\">{}</p>", text(message)))
        .unwrap_or_default();
    let body = format!(
        "<h1>Log in</h1>\n{error}\n<form method=\"post\" action=\"/login/\">\n\
         <label>Username <input name=\"username\" value=\"{username}\" autofocus required></label>\n\
         <label>Password <input name=\"password\" type=\"password\" required></label>\n\
         <button type=\"submit\">Log in</button>\n</form>\n\
         <p>No account? <a href=\"/signup/\">Sign up</a></p>",
        username = attr(username),
    );
    layout("Log in", &body)
}

pub fn signup(errors: &FieldErrors, username: &str) -> Html<String> {
    let body = format!(
        "<h1>Sign up</h1>\n<form method=\"post\" action=\"/signup/\">\n\
         {username_errors}<label>Username <input name=\"username\" value=\"{username}\" required></label>\n\
         {password1_errors}<label>Password <input name=\"password1\" type=\"password\" required></label>\n\
         {password2_errors}<label>Password confirmation <input name=\"password2\" type=\"password\" required></label>\n\
         <button type=\"submit\">Sign up</button>\n</form>\n\
         <p>Already registered? <a href=\"/login/\">Log in</a></p>",
        username_errors = error_list(errors.get("username")),
        password1_errors = error_list(errors.get("password1")),
        password2_errors = error_list(errors.get("password2")),
        username = attr(username),
    );
    layout("Sign up", &body)
}

pub fn task_interface(user: &User, api_prefix: &str) -> Html<String> {
    let body = format!(
        "<h1>{username}'s tasks</h1>\n{logout}\n\
         <form id=\"filters\">\n\
         <input name=\"search\" placeholder=\"Search\">\n\
         <label>From <input name=\"created_at_after\" type=\"date\"></label>\n\
         <label>To <input name=\"created_at_before\" type=\"date\"></label>\n\
         <button type=\"submit\">Filter</button>\n</form>\n\
         <form id=\"new-task\">\n\
         <input name=\"title\" placeholder=\"Title\" required maxlength=\"200\">\n\
         <input name=\"description\" placeholder=\"Description\">\n\
         <button type=\"submit\">Add</button>\n</form>\n\
         <ul id=\"tasks\" data-api=\"{api}/\"></ul>\n\
         <script src=\"/static/tasks.js\" defer></script>",
        username = text(&user.username),
        logout = logout_form(),
        api = attr(api_prefix),
    );
    layout("Tasks", &body)
}

pub struct AdminRow<'a> {
    pub task: &'a Task,
    pub owner: &'a str,
}

/// `search` is the raw `q` value; the other controls are restored from `filter`.
pub fn admin_listing(user: &User, rows: &[AdminRow<'_>], search: &str, filter: &AdminTaskFilter) -> Html<String> {
    let table_rows: String = rows
        .iter()
        .map(|row| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                text(&row.task.title),
                text(row.owner),
                if row.task.is_completed { "yes" } else { "no" },
                row.task.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            )
        })
        .collect();
    let body = format!(
        "<h1>Task administration</h1>\n<p>Signed in as {username}.</p>\n{logout}\n\
         <form method=\"get\" action=\"/admin/\">\n\
         <input name=\"q\" value=\"{search}\" placeholder=\"Search\">\n\
         <select name=\"is_completed\"><option value=\"\">All</option>\
         <option value=\"true\"{completed}>Completed</option><option value=\"false\"{pending}>Pending</option></select>\n\
         <input name=\"owner\" value=\"{owner}\" placeholder=\"Owner\">\n\
         <button type=\"submit\">Filter</button>\n</form>\n\
         <p>{count} task(s)</p>\n\
         <table>\n<thead><tr><th>Title</th><th>Owner</th><th>Completed</th><th>Created</th></tr></thead>\n\
         <tbody>\n{table_rows}</tbody>\n</table>",
        username = text(&user.username),
        logout = logout_form(),
        search = attr(search),
        completed = selected(filter.is_completed == Some(true)),
        pending = selected(filter.is_completed == Some(false)),
        owner = attr(filter.owner.as_deref().unwrap_or("")),
        count = rows.len(),
    );
    layout("Task administration", &body)
}

fn selected(active: bool) -> &'static str {
    if active {
        " selected"
    } else {
        ""
    }
}

pub fn forbidden() -> Html<String> {
    layout(
        "Forbidden",
        "<h1>403 Forbidden</h1>\n<p>You do not have permission to view this page.</p>\n<p><a href=\"/\">Home</a></p>",
    )
}
