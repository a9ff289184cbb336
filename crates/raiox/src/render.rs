//! Text panels printed by the terminal UI.

use std::fmt::Write;

use owo_colors::OwoColorize;
use raiox_core::CustomerRecord;
use raiox_core::conversation::{Role, Transcript};

/// Left border of every panel line.
pub const BAR_CHAR: &str = "▎";

/// The command reference printed by `:ajuda`.
pub fn help() -> String {
    let mut out = String::new();
    let bar = BAR_CHAR.bright_black();
    let _ = writeln!(out, "{bar}{}", "Comandos".bold());
    for (command, description) in [
        (":cliente <id>", "consultar outro cliente"),
        (":limpar", "limpar cliente, resumo e conversa"),
        (":conversa", "mostrar a conversa novamente"),
        (":ajuda", "mostrar esta ajuda"),
        (":sair", "encerrar"),
    ] {
        let _ = writeln!(out, "{bar}  {:<15} {description}", command.cyan());
    }
    let _ = writeln!(
        out,
        "{bar}Termine uma linha com \\ para continuar a pergunta na linha \
         seguinte."
    );
    out
}

/// The labelled key fields of `record`.
pub fn key_fields(record: &CustomerRecord) -> String {
    let mut out = String::new();
    let bar = BAR_CHAR.bright_blue();
    let _ = writeln!(out, "{bar}🧾 {}", "Dados do Cliente".bold());
    for (label, value) in record.key_fields() {
        let _ = writeln!(out, "{bar}{}: {value}", label.bold());
    }
    out
}

pub fn summary(text: &str) -> String {
    let mut out = String::new();
    let bar = BAR_CHAR.bright_green();
    let _ = writeln!(out, "{bar}📊 {}", "Resumo Geral do Cliente".bold());
    for line in text.lines() {
        let _ = writeln!(out, "{bar}{line}");
    }
    out
}

/// Every exchanged turn, oldest first. The system turn is not shown.
pub fn transcript(transcript: &Transcript) -> String {
    let mut out = String::new();
    let bar = BAR_CHAR.bright_cyan();
    let _ = writeln!(out, "{bar}💬 {}", "Conversa com o Assistente".bold());
    for turn in transcript.exchanges() {
        let speaker = match turn.role {
            Role::User => "🧑‍💼 Você:",
            Role::Assistant => "🤖 Assistente:",
            Role::System => continue,
        };
        let mut lines = turn.text.lines();
        let first = lines.next().unwrap_or_default();
        let _ = writeln!(out, "{bar}{} {first}", speaker.bold());
        for line in lines {
            let _ = writeln!(out, "{bar}{line}");
        }
    }
    out
}

pub fn not_found() -> String {
    format!("{}⚠️  Cliente não encontrado.", BAR_CHAR.bright_yellow())
}

pub fn invalid_input() -> String {
    format!(
        "{}⚠️  Linha ignorada: o terminal não enviou texto UTF-8.",
        BAR_CHAR.bright_yellow()
    )
}
