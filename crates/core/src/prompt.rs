//! Prompt texts sent to the model.

use std::fmt::Write;

use crate::dataset::CustomerRecord;

const PREAMBLE: &str = "Você é um assistente especializado em Banda Larga.";

/// Renders every field of `record` as a `"{field}: {value}"` line, in
/// schema order.
pub fn field_dump(record: &CustomerRecord) -> String {
    let mut dump = String::new();
    for (idx, (name, value)) in record.fields().enumerate() {
        if idx > 0 {
            dump.push('\n');
        }
        // Writing into a `String` cannot fail.
        let _ = write!(dump, "{name}: {value}");
    }
    dump
}

/// The single user message that asks for a customer summary.
pub fn summary_prompt(record: &CustomerRecord) -> String {
    format!(
        "{PREAMBLE}\n\
         A seguir estão várias informações referentes a um determinado \
         Cliente:\n\n\
         {dump}\n\n\
         Faça um resumo de todas as informações do Cliente em questão.\n\
         Regras:\n\
         - Dê ênfase aos campos com informações úteis.\n\
         - Ignore campos com valor 0 ou NaN.",
        dump = field_dump(record),
    )
}

/// The instructions that open every conversation about `record`.
pub fn system_prompt(record: &CustomerRecord) -> String {
    format!(
        "{PREAMBLE} Use os dados abaixo como referência:\n{}",
        field_dump(record)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::schema::CANONICAL_COLUMNS;

    #[test]
    fn test_field_dump() {
        let dataset = fixtures::dataset(&[("C-1", "Campinas")]);
        let record = dataset.find("C-1").unwrap();
        let dump = field_dump(record);

        let lines: Vec<_> = dump.lines().collect();
        assert_eq!(lines.len(), CANONICAL_COLUMNS.len());
        assert_eq!(lines[0], format!("{}: C-1", CANONICAL_COLUMNS[0]));
        assert_eq!(lines[1], format!("{}: Cliente C-1", CANONICAL_COLUMNS[1]));
        assert!(lines.contains(&"Município: Campinas"));
        assert!(!dump.ends_with('\n'));
    }

    #[test]
    fn test_summary_prompt() {
        let dataset = fixtures::dataset(&[("C-1", "Campinas")]);
        let record = dataset.find("C-1").unwrap();
        let prompt = summary_prompt(record);

        assert!(prompt.starts_with(
            "Você é um assistente especializado em Banda Larga.\n\
             A seguir estão várias informações referentes a um determinado \
             Cliente:\n\n"
        ));
        assert!(prompt.contains(&field_dump(record)));
        assert!(prompt.ends_with(
            "\n\nFaça um resumo de todas as informações do Cliente em \
             questão.\nRegras:\n- Dê ênfase aos campos com informações \
             úteis.\n- Ignore campos com valor 0 ou NaN."
        ));
    }

    #[test]
    fn test_system_prompt() {
        let dataset = fixtures::dataset(&[("C-1", "Campinas")]);
        let record = dataset.find("C-1").unwrap();
        assert_eq!(
            system_prompt(record),
            format!(
                "Você é um assistente especializado em Banda Larga. Use os \
                 dados abaixo como referência:\n{}",
                field_dump(record)
            )
        );
    }
}
