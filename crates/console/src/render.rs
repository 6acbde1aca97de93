//! HTML templates for the console.
//!
//! Plain string interpolation; every value that comes from the operator or
//! from the sheet goes through [`html_escape`].

use crate::view::{Banner, FormView, ListPhase, ListView};
use certidao_common::format::{display_cnpj, display_date};
use certidao_common::models::{CertidaoRecord, DocumentType};
use std::fmt::Write;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Cadastro,
    Consulta,
}

impl Tab {
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("consulta") => Self::Consulta,
            _ => Self::Cadastro,
        }
    }

    /// Opening the list goes through `/consulta` so every visit reloads it.
    fn href(&self) -> &'static str {
        match self {
            Self::Cadastro => "/?tab=cadastro",
            Self::Consulta => "/consulta",
        }
    }
}

struct Field {
    name: &'static str,
    label: &'static str,
    kind: &'static str,
    placeholder: &'static str,
    wide: bool,
}

const FIELDS: [Field; 7] = [
    Field {
        name: "empresa",
        label: "Empresa / Responsável",
        kind: "text",
        placeholder: "Razão Social ou Nome do Responsável",
        wide: true,
    },
    Field {
        name: "cnpj",
        label: "CNPJ",
        kind: "text",
        placeholder: "00.000.000/0000-00",
        wide: false,
    },
    Field {
        name: "email",
        label: "Email do Responsável",
        kind: "email",
        placeholder: "email@empresa.com.br",
        wide: false,
    },
    Field {
        name: "orgao",
        label: "Órgão Emissor",
        kind: "text",
        placeholder: "Ex: Receita Federal",
        wide: false,
    },
    Field {
        name: "dataEmissao",
        label: "Data de Emissão",
        kind: "date",
        placeholder: "",
        wide: false,
    },
    Field {
        name: "fimVigencia",
        label: "Fim da Vigência",
        kind: "date",
        placeholder: "",
        wide: false,
    },
    Field {
        name: "statusNovoVenc",
        label: "Status / Novo Vencimento",
        kind: "text",
        placeholder: "Descreva o status atual ou a nova data de vencimento",
        wide: true,
    },
];

const CSS: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f8fafc; color: #0f172a; padding: 2rem 1rem; }
.container { max-width: 56rem; margin: 0 auto; }
header { text-align: center; margin-bottom: 2rem; }
header h1 { font-size: 1.875rem; font-weight: 700; }
header p { color: #475569; margin-top: 0.5rem; }
.tabs { display: flex; justify-content: center; gap: 0.25rem; margin-bottom: 1.5rem; }
.tab { padding: 0.6rem 1.5rem; border-radius: 6px; color: #475569; text-decoration: none; font-weight: 500; }
.tab.active { background: #2563eb; color: #fff; }
.card { background: #fff; border: 1px solid #e2e8f0; border-radius: 12px; min-height: 500px; overflow: hidden; }
.banner { padding: 1rem; font-weight: 500; }
.banner.success { background: #f0fdf4; color: #15803d; border-bottom: 1px solid #dcfce7; }
.banner.error { background: #fef2f2; color: #b91c1c; border-bottom: 1px solid #fee2e2; }
form.cadastro { padding: 2rem; display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
.field { display: flex; flex-direction: column; gap: 0.4rem; }
.field.wide, .actions { grid-column: span 2; }
.field label { font-size: 0.875rem; font-weight: 500; color: #334155; }
.field input, .field select { padding: 0.6rem 0.75rem; border: 1px solid #cbd5e1; border-radius: 6px; font-size: 0.95rem; }
.actions { display: flex; justify-content: flex-end; }
button { background: #2563eb; color: #fff; border: none; border-radius: 8px; padding: 0.6rem 1.5rem; font-weight: 600; cursor: pointer; }
button:disabled { background: #93c5fd; cursor: not-allowed; }
.list-header { display: flex; justify-content: space-between; align-items: center; padding: 1rem 1.5rem; border-bottom: 1px solid #e2e8f0; }
.state { text-align: center; padding: 4rem 1rem; color: #64748b; }
.state.error { color: #dc2626; background: #fef2f2; margin: 1.5rem; border-radius: 8px; }
.state.error button { margin-top: 1rem; background: #fee2e2; color: #b91c1c; }
table { width: 100%; border-collapse: collapse; font-size: 0.875rem; }
th { text-align: left; text-transform: uppercase; font-size: 0.75rem; background: #f8fafc; padding: 0.75rem 1.5rem; }
td { padding: 1rem 1.5rem; border-top: 1px solid #e2e8f0; }
.pill { padding: 0.1rem 0.6rem; border-radius: 999px; background: #dbeafe; color: #1e40af; font-size: 0.75rem; }
.list-footer { padding: 0.75rem 1.5rem; background: #f8fafc; border-top: 1px solid #e2e8f0; font-size: 0.75rem; color: #64748b; }
footer { text-align: center; font-size: 0.75rem; color: #94a3b8; margin-top: 1.5rem; }
"#;

pub fn page(tab: Tab, form: &FormView, list: &ListView, now: Instant, year: i32) -> String {
    let body = match tab {
        Tab::Cadastro => cadastro(form, now),
        Tab::Consulta => consulta(list),
    };
    let refresh = auto_refresh_secs(tab, form, list, now)
        .map(|secs| format!(r#"<meta http-equiv="refresh" content="{secs}">"#))
        .unwrap_or_default();
    let nav = nav(tab);

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    {refresh}
    <title>Gestão de Certidões</title>
    <style>{CSS}</style>
</head>
<body>
    <div class="container">
        <header>
            <h1>Gestão de Certidões</h1>
            <p>Controle unificado de documentos e vencimentos.</p>
        </header>
        {nav}
        <main class="card">
            {body}
        </main>
        <footer>&copy; {year} Sistema de Gestão Corporativa. Todos os direitos reservados.</footer>
    </div>
</body>
</html>"#
    )
}

/// Without scripts the page reloads itself: while a list load or a
/// submission is pending, and when a success banner is due to disappear.
fn auto_refresh_secs(tab: Tab, form: &FormView, list: &ListView, now: Instant) -> Option<u64> {
    match tab {
        Tab::Consulta if list.is_loading() => Some(1),
        Tab::Consulta => None,
        Tab::Cadastro if form.is_submitting() => Some(1),
        Tab::Cadastro => form
            .banner(now)
            .and_then(|banner| banner.remaining(now))
            .map(|left| left.as_secs_f64().ceil() as u64),
    }
}

fn nav(active: Tab) -> String {
    let link = |tab: Tab, label: &str| {
        let class = if tab == active { "tab active" } else { "tab" };
        format!(r#"<a class="{class}" href="{}">{label}</a>"#, tab.href())
    };
    format!(
        r#"<nav class="tabs">{}{}</nav>"#,
        link(Tab::Cadastro, "Cadastro"),
        link(Tab::Consulta, "Base de Dados")
    )
}

fn cadastro(form: &FormView, now: Instant) -> String {
    let banner = form.banner(now).map(banner_html).unwrap_or_default();
    let values = form.values();

    let mut fields = String::new();
    for (index, field) in FIELDS.iter().enumerate() {
        fields.push_str(&input_html(field, values));
        // The document type select sits between e-mail and issuing body.
        if index == 2 {
            fields.push_str(&document_type_html(values));
        }
    }

    let (disabled, label) = if form.is_submitting() {
        (" disabled", "Salvando...")
    } else {
        ("", "Salvar Certidão")
    };

    format!(
        r#"{banner}
<form class="cadastro" method="post" action="/cadastro">
    {fields}
    <div class="actions"><button type="submit"{disabled}>{label}</button></div>
</form>"#
    )
}

fn banner_html(banner: &Banner) -> String {
    let class = if banner.is_success() { "success" } else { "error" };
    format!(
        r#"<div class="banner {class}" role="status">{}</div>"#,
        html_escape(banner.message())
    )
}

fn input_html(field: &Field, values: &CertidaoRecord) -> String {
    let class = if field.wide { "field wide" } else { "field" };
    let value = values.field(field.name).unwrap_or_default();
    format!(
        r#"<div class="{class}">
        <label for="{name}">{label}</label>
        <input id="{name}" name="{name}" type="{kind}" value="{value}" placeholder="{placeholder}" required>
    </div>"#,
        name = field.name,
        label = field.label,
        kind = field.kind,
        value = html_escape(value),
        placeholder = field.placeholder,
    )
}

fn document_type_html(values: &CertidaoRecord) -> String {
    let selected = values.document_type();
    let mut options = String::from(r#"<option value="">Selecione o tipo...</option>"#);
    for kind in DocumentType::ALL {
        let attr = if selected == Some(kind) { " selected" } else { "" };
        let _ = write!(options, r#"<option value="{kind}"{attr}>{kind}</option>"#);
    }
    format!(
        r#"<div class="field">
        <label for="tipoDocumento">Tipo de Documento</label>
        <select id="tipoDocumento" name="tipoDocumento" required>{options}</select>
    </div>"#
    )
}

fn consulta(list: &ListView) -> String {
    match list.phase() {
        ListPhase::Loading => {
            r#"<div class="state">Carregando base de dados...</div>"#.to_string()
        }
        ListPhase::Failed(message) => format!(
            r#"<div class="state error">
    <p>{}</p>
    <form method="post" action="/consulta/refresh"><button type="submit">Tentar novamente</button></form>
</div>"#,
            html_escape(message)
        ),
        ListPhase::Empty => with_list_chrome(
            list,
            r#"<div class="state">Nenhuma certidão encontrada na base.</div>"#,
        ),
        ListPhase::Rows(records) => with_list_chrome(list, &table_html(records)),
    }
}

fn with_list_chrome(list: &ListView, content: &str) -> String {
    let disabled = if list.is_loading() { " disabled" } else { "" };
    format!(
        r#"<div class="list-header">
    <h2>Base de Certidões</h2>
    <form method="post" action="/consulta/refresh"><button type="submit" title="Atualizar lista"{disabled}>Atualizar</button></form>
</div>
<div class="list-body">{content}</div>
<div class="list-footer">Total de registros: {}</div>"#,
        list.records().len()
    )
}

fn table_html(records: &[CertidaoRecord]) -> String {
    let mut rows = String::new();
    for record in records {
        let _ = write!(
            rows,
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><span class="pill">{}</span></td><td>{}</td></tr>"#,
            html_escape(&record.empresa),
            html_escape(&display_cnpj(&record.cnpj)),
            html_escape(&record.tipo_documento),
            html_escape(&record.orgao),
            html_escape(&display_date(&record.fim_vigencia)),
            html_escape(&record.status_novo_venc),
        );
    }
    format!(
        r#"<table>
    <thead><tr><th>Empresa / Resp.</th><th>CNPJ</th><th>Tipo</th><th>Órgão</th><th>Vencimento</th><th>Status</th></tr></thead>
    <tbody>{rows}</tbody>
</table>"#
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn loaded(records: Vec<CertidaoRecord>) -> ListView {
        let mut list = ListView::default();
        let ticket = list.begin_fetch();
        list.complete(ticket, Ok(records));
        list
    }

    #[test]
    fn single_row_has_company_in_first_column() {
        let list = loaded(vec![CertidaoRecord {
            empresa: "Acme".to_string(),
            fim_vigencia: "2025-03-01".to_string(),
            ..Default::default()
        }]);
        let html = consulta(&list);
        assert_eq!(html.matches("<tr><td>").count(), 1);
        assert!(html.contains("<tr><td>Acme</td>"));
        assert!(html.contains("01/03/2025"));
        assert!(html.contains("Total de registros: 1"));
    }

    #[test]
    fn empty_list_shows_empty_state_only() {
        let html = consulta(&loaded(Vec::new()));
        assert!(html.contains("Nenhuma certidão encontrada na base."));
        assert!(!html.contains("Carregando"));
        assert!(!html.contains("Tentar novamente"));
    }

    #[test]
    fn sheet_values_are_escaped() {
        let list = loaded(vec![CertidaoRecord {
            empresa: "<script>alert(1)</script>".to_string(),
            ..Default::default()
        }]);
        let html = consulta(&list);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn form_keeps_values_and_selects_document_type() {
        let mut form = FormView::default();
        form.update("empresa", "Acme \"Matriz\"");
        form.update("tipoDocumento", "Trabalhista");
        let html = cadastro(&form, Instant::now());
        assert!(html.contains(r#"value="Acme &quot;Matriz&quot;""#));
        assert!(html.contains(r#"<option value="Trabalhista" selected>"#));
        assert_eq!(html.matches(" required").count(), 8);
    }

    #[test]
    fn success_banner_schedules_reload_until_expiry() {
        let mut form = FormView::default();
        let now = Instant::now();
        form.begin_submit();
        form.submit_succeeded(now, Duration::from_secs(5));

        let list = ListView::default();
        assert_eq!(auto_refresh_secs(Tab::Cadastro, &form, &list, now), Some(5));
        let html = page(Tab::Cadastro, &form, &list, now, 2026);
        assert!(html.contains("Certidão cadastrada com sucesso!"));

        let later = now + Duration::from_secs(5);
        assert_eq!(auto_refresh_secs(Tab::Cadastro, &form, &list, later), None);
        assert!(!page(Tab::Cadastro, &form, &list, later, 2026).contains("cadastrada com sucesso"));
    }

    #[test]
    fn submitting_disables_button() {
        let mut form = FormView::default();
        form.begin_submit();
        let html = cadastro(&form, Instant::now());
        assert!(html.contains("<button type=\"submit\" disabled>Salvando...</button>"));
    }

    #[test]
    fn submitting_page_reloads_until_settled() {
        let mut form = FormView::default();
        let list = ListView::default();
        let now = Instant::now();
        form.begin_submit();

        assert_eq!(auto_refresh_secs(Tab::Cadastro, &form, &list, now), Some(1));
        let html = page(Tab::Cadastro, &form, &list, now, 2026);
        assert!(html.contains(r#"<meta http-equiv="refresh" content="1">"#));

        form.submit_failed();
        assert_eq!(auto_refresh_secs(Tab::Cadastro, &form, &list, now), None);
    }

    #[test]
    fn list_tab_link_goes_through_reload_route() {
        let html = nav(Tab::Cadastro);
        assert!(html.contains(r#"href="/consulta">Base de Dados</a>"#));
        assert!(html.contains(r#"class="tab active" href="/?tab=cadastro""#));
    }

    #[test]
    fn tab_query_defaults_to_cadastro() {
        assert_eq!(Tab::from_query(None), Tab::Cadastro);
        assert_eq!(Tab::from_query(Some("consulta")), Tab::Consulta);
        assert_eq!(Tab::from_query(Some("other")), Tab::Cadastro);
    }
}
