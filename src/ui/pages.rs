//! Form pages: Borrow, Return, Inventory and Logs

use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Response},
};
use chrono::Duration;
use serde::Deserialize;

use super::html::{escape, layout, redirect_with, Flash, Page};
use crate::{
    config::ImportMode,
    error::{AppError, AppResult},
    models::{
        enums::Category,
        import_report::ImportAction,
        item::CreateItem,
        loan::{format_timestamp, CreateLoan, ReminderDraft, MAX_LOAN_DAYS},
    },
    services::local_now,
    AppState,
};

/// Re-render a form page with the error banner, or fall through to the
/// error response when the page itself cannot be built.
fn rejected(error: &AppError, page: AppResult<Html<String>>) -> Response {
    match page {
        Ok(html) => (error.status_and_code().0, html).into_response(),
        Err(e) => e.into_response(),
    }
}

// ---------------------------------------------------------------------------
// Borrow
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct BorrowForm {
    pub student_name: String,
    #[serde(default)]
    pub contact_info: String,
    /// Absent when nothing is in stock
    pub item_id: Option<i64>,
    pub return_date: chrono::NaiveDate,
}

pub async fn borrow_page(
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
) -> AppResult<Html<String>> {
    render_borrow(&state, &flash).await
}

async fn render_borrow(state: &AppState, flash: &Flash) -> AppResult<Html<String>> {
    let items = state.services.catalog.list_available().await?;

    let options = if items.is_empty() {
        r#"<select name="item_id" disabled><option>Out of Stock</option></select>"#.to_string()
    } else {
        let opts: String = items
            .iter()
            .map(|item| format!(r#"<option value="{}">{}</option>"#, item.id, escape(&item.picker_label())))
            .collect();
        format!(r#"<select name="item_id" required>{}</select>"#, opts)
    };

    let today = local_now().date();
    let body = format!(
        r#"<div class="card">
<form method="post" action="/borrow">
<label>Student Name / ID</label><input name="student_name" required>
<label>Email / Phone Number</label><input name="contact_info">
<label>Select Item</label>{options}
<label>Expected Return Date (Max {max_days} days)</label>
<input type="date" name="return_date" value="{default}" min="{min}" max="{max}" required>
<button type="submit">Confirm Checkout</button>
</form>
</div>"#,
        options = options,
        max_days = MAX_LOAN_DAYS,
        default = today + Duration::days(1),
        min = today,
        max = today + Duration::days(MAX_LOAN_DAYS),
    );

    Ok(layout(&state.assets, Page::Borrow, flash, &body))
}

pub async fn borrow_submit(State(state): State<AppState>, Form(form): Form<BorrowForm>) -> Response {
    let result = match form.item_id {
        Some(item_id) => {
            state
                .services
                .loans
                .borrow(CreateLoan {
                    student_name: form.student_name,
                    contact_info: form.contact_info,
                    item_id,
                    return_date: form.return_date,
                })
                .await
        }
        None => Err(AppError::Validation("No equipment is available to borrow".to_string())),
    };

    match result {
        Ok(loan) => redirect_with(
            Page::Borrow.path(),
            "notice",
            &format!("Success! Please return by {}.", loan.expected_return.date()),
        )
        .into_response(),
        Err(e) if e.is_user_facing() => {
            let page = render_borrow(&state, &Flash::error(e.to_string())).await;
            rejected(&e, page)
        }
        Err(e) => e.into_response(),
    }
}

// ---------------------------------------------------------------------------
// Return
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReturnForm {
    pub loan_id: i64,
}

pub async fn return_page(
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
) -> AppResult<Html<String>> {
    render_return(&state, &flash).await
}

async fn render_return(state: &AppState, flash: &Flash) -> AppResult<Html<String>> {
    let loans = state.services.loans.open_loans().await?;

    let body = if loans.is_empty() {
        r#"<div class="card"><p>All items are accounted for. No pending returns.</p></div>"#.to_string()
    } else {
        let opts: String = loans
            .iter()
            .map(|loan| format!(r#"<option value="{}">{}</option>"#, loan.id, escape(&loan.picker_label())))
            .collect();
        format!(
            r#"<div class="card">
<form method="post" action="/return">
<label>Select Loan Record</label><select name="loan_id" required>{}</select>
<button type="submit">Confirm Return</button>
</form>
</div>"#,
            opts
        )
    };

    Ok(layout(&state.assets, Page::Return, flash, &body))
}

pub async fn return_submit(State(state): State<AppState>, Form(form): Form<ReturnForm>) -> Response {
    match state.services.loans.return_loan(form.loan_id).await {
        Ok(loan) => redirect_with(
            Page::Return.path(),
            "notice",
            &format!("{} returned successfully!", loan.item_name),
        )
        .into_response(),
        Err(e) if e.is_user_facing() => {
            let page = render_return(&state, &Flash::error(e.to_string())).await;
            rejected(&e, page)
        }
        Err(e) => e.into_response(),
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

pub async fn inventory_page(
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
) -> AppResult<Html<String>> {
    render_inventory(&state, &flash).await
}

async fn render_inventory(state: &AppState, flash: &Flash) -> AppResult<Html<String>> {
    let items = state.services.catalog.list_items(&Default::default()).await?;

    let import_hint = match state.config.catalog.import_mode {
        ImportMode::OnEmpty => "The default list is also imported automatically at startup when inventory is empty.",
        ImportMode::Manual => "The default list is only imported from here.",
    };

    let table = if items.is_empty() {
        "<p>Inventory is empty. Use the import button above.</p>".to_string()
    } else {
        let rows: String = items
            .iter()
            .map(|item| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape(&item.name),
                    item.category,
                    item.in_stock_qty,
                    item.total_qty
                )
            })
            .collect();
        format!(
            "<table><tr><th>Item Name</th><th>Category</th><th>In Stock</th><th>Total Qty</th></tr>{}</table>",
            rows
        )
    };

    let categories: String = Category::ALL
        .iter()
        .map(|c| format!(r#"<option value="{0}">{0}</option>"#, c))
        .collect();

    let body = format!(
        r#"<div class="card">
<h3>Quick Action: Import Default Items</h3>
<p>{import_hint}</p>
<form method="post" action="/inventory/import"><button type="submit">Import 50 Common Items</button></form>
</div>
<div class="card">
<h3>Current Inventory</h3>
{table}
</div>
<div class="card">
<h3>Add New Item</h3>
<form method="post" action="/inventory/items">
<label>Item Name</label><input name="name" required>
<label>Category</label><select name="category">{categories}</select>
<label>Total Quantity</label><input type="number" name="total_qty" min="1" value="1" required>
<button type="submit">Add to Inventory</button>
</form>
</div>"#,
        import_hint = import_hint,
        table = table,
        categories = categories,
    );

    Ok(layout(&state.assets, Page::Inventory, flash, &body))
}

pub async fn add_item_submit(State(state): State<AppState>, Form(form): Form<CreateItem>) -> Response {
    match state.services.catalog.create_item(form).await {
        Ok(item) => {
            redirect_with(Page::Inventory.path(), "notice", &format!("Added: {}", item.name)).into_response()
        }
        Err(e) if e.is_user_facing() => {
            let page = render_inventory(&state, &Flash::error(e.to_string())).await;
            rejected(&e, page)
        }
        Err(e) => e.into_response(),
    }
}

pub async fn import_submit(State(state): State<AppState>) -> Response {
    match state.services.catalog.import_defaults().await {
        Ok(report) => {
            let kind = match report.action {
                ImportAction::Imported => "notice",
                ImportAction::SkippedNotEmpty => "warning",
            };
            redirect_with(Page::Inventory.path(), kind, &report.message).into_response()
        }
        Err(e) => e.into_response(),
    }
}

// ---------------------------------------------------------------------------
// Logs & notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    /// Loan to draft a reminder for
    pub notify: Option<i64>,
}

pub async fn logs_page(
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
    Query(query): Query<LogsQuery>,
) -> Response {
    let draft = match query.notify {
        Some(loan_id) => match state.services.reminders.draft(loan_id).await {
            Ok(draft) => Some(draft),
            Err(e) if e.is_user_facing() => {
                let page = render_logs(&state, &Flash::error(e.to_string()), None).await;
                return rejected(&e, page);
            }
            Err(e) => return e.into_response(),
        },
        None => None,
    };

    match render_logs(&state, &flash, draft.as_ref()).await {
        Ok(page) => page.into_response(),
        Err(e) => e.into_response(),
    }
}

async fn render_logs(
    state: &AppState,
    flash: &Flash,
    draft: Option<&ReminderDraft>,
) -> AppResult<Html<String>> {
    let active = state.services.loans.active_loans().await?;
    let mut body = String::from(r#"<div class="card"><h3>Overdue / Due Soon</h3>"#);

    if active.is_empty() {
        body.push_str("<p>No active loans at the moment.</p>");
    } else {
        let rows: String = active
            .iter()
            .map(|loan| {
                format!(
                    r#"<tr{}><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                    if loan.is_overdue { r#" class="overdue""# } else { "" },
                    escape(&loan.student_name),
                    escape(&loan.contact_info),
                    escape(&loan.item_name),
                    format_timestamp(&loan.expected_return),
                    loan.duration_days,
                    loan.status_label()
                )
            })
            .collect();
        body.push_str(&format!(
            "<table><tr><th>Student</th><th>Contact</th><th>Item</th><th>Due Date</th><th>Days</th><th>Status</th></tr>{}</table>",
            rows
        ));

        let opts: String = active
            .iter()
            .map(|loan| {
                let selected = if draft.map(|d| d.loan_id) == Some(loan.id) { " selected" } else { "" };
                format!(
                    r#"<option value="{}"{}>{} ({}) - {}</option>"#,
                    loan.id,
                    selected,
                    escape(&loan.student_name),
                    escape(&loan.contact_info),
                    escape(&loan.item_name)
                )
            })
            .collect();
        body.push_str(&format!(
            r#"<h3>Send Reminder Email</h3>
<form method="get" action="/logs">
<label>Select Student to Notify</label><select name="notify">{}</select>
<button type="submit">Generate Email Draft</button>
</form>"#,
            opts
        ));
    }

    if let Some(draft) = draft {
        body.push_str(&format!("<pre>{}</pre>", escape(&draft.body)));
        match &draft.mailto {
            Some(link) => body.push_str(&format!(
                r#"<p><a href="{}">Click here to open Email Client</a></p>"#,
                escape(link)
            )),
            None => body.push_str(&format!(
                "<p>No email address on file. Contact: {}</p>",
                escape(&draft.recipient)
            )),
        }
    }
    body.push_str("</div>");

    let history = state.services.loans.history(None).await?;
    let rows: String = history
        .iter()
        .map(|loan| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                loan.id,
                escape(&loan.student_name),
                escape(&loan.contact_info),
                escape(&loan.item_name),
                escape(&loan.action),
                format_timestamp(&loan.borrow_time),
                loan.duration_days,
                format_timestamp(&loan.expected_return),
                loan.status
            )
        })
        .collect();
    body.push_str(&format!(
        r#"<details class="card"><summary>View Full History Log</summary>
<table><tr><th>ID</th><th>Student</th><th>Contact</th><th>Item</th><th>Action</th><th>Time</th><th>Duration</th><th>Expected Return</th><th>Status</th></tr>{}</table>
</details>"#,
        rows
    ));

    Ok(layout(&state.assets, Page::Logs, flash, &body))
}
