//! The canonical column layout of the customer spreadsheet.

use std::ops::Index;
use std::sync::Arc;

/// Canonical field names, in spreadsheet order.
///
/// Source columns are renamed positionally to these names, so the source
/// must have exactly this many columns (after a missing display-name
/// column has been synthesized).
pub const CANONICAL_COLUMNS: [&str; 59] = [
    "Código da Operadora / Contrato do Cliente",
    "Nome do Cliente",
    "Node da Instalação do Cliente",
    "Município",
    "Célula da Instalação do Cliente",
    "Produto Principal",
    "Produto de Telefone",
    "Produto de Banda Larga",
    "Modelo do Modem do Cliente",
    "Modelo do Decoder da TV",
    "Tecnologia da Banda Larga",
    "Visitas Técnicas Agendadas últimos 15 dias",
    "Visitas Técnicas Executadas últimos 15 dias",
    "Visitas Técnicas Cqanceladas últimos 15 dias",
    "Quantidade de Ligações ou Interações no digital últimos 15 dias",
    "Quantidade Ligações Retidas na URA, que não foram direcionadas a atendente humano",
    "Quantidade Ligações Direcionadas para Humano",
    "Quantidade de Eventos no Digital (Site/App)",
    "Quantidade de Outage Sem Sinal Corretivo",
    "Quantidade de Outage Sem Sinal Preventivo",
    "Quantidade de Outage por degradação",
    "Quantidade de Outage Informativo",
    "Tempo de Outage Sem Sinal Corretivo",
    "Tempo de Outage Sem Sinal Preventivo",
    "Tempo de Outage por degradação",
    "Tempo de Outage Informativo",
    "Ferramenta Xpertrack - Porcentagem do Tempo que a rede estava Impactada",
    "Ferramenta Xpertrack - Porcentagem do Tempo que a rede estava Estressada",
    "Ferramenta Xpertrack - Quantidade de Dias que a rede estava em estado Crônica",
    "Ferramenta Xpertrack - Porcentagem do Tempo que a rede estava Online",
    "Ferramenta Xpertrack - \"QOE\" - Nota de Qualidade da Célula da Instalação (De 0 a 100)",
    "Speed Test OOKLA - Quantidade de Testes de Velocidades Feitos",
    "Speed Test OOKLA - Rating Testes",
    "Speed Test OOKLA - Percent Rating Testes",
    "Speed Test OOKLA - Porcentagem de  Velocidade Atingida no Downstream versus a Contratada",
    "Ferramenta Beegol - Porcentagem de Velocidade Atingida no Downstream versus a Contratada",
    "Speed Test OOKLA - Porcentagem de Velocidade Atingida no Upstream versus a Contratada",
    "Ferramenta Beegol - Porcentagem de Velocidade Atingida no Upstream versus a Contratada",
    "Ferramenta Beegol - Velocidade Atingida no Downstream em kbps",
    "Speed Test OOKLA - Velocidade Atingida no Downstream em kbps",
    "Ferramenta Beegol - Velocidade Atingida no Upstream em kbps",
    "Speed Test OOKLA - Velocidade Atingida no Upstream em kbps",
    "NOTA_RATING",
    "Speed Test OOKLA - Nota de Avaliação do Teste",
    "Speed Test OOKLA - RSSI Medido (Maior que -60 - Bom, Menor que -60 Ruim)",
    "Nota Pesquisa Recomendação Sinal",
    "Nota da Pesquisa - Banda Larga",
    "Nota da Pesquisa - Produto TV",
    "Nota da Pesquisa - Queda de Sinal",
    "A pesquisa  TNPS Inst teve Verbatin?",
    "Data da Pesquisa TNPS",
    "Quantidade de Manisfestos",
    "Ferramenta Beegol - Nota de Qualidade \"QOE\" - Geral",
    "Ferramenta Beegol - Nota de Qualidade \"QOE\" - Banda Larga",
    "Ferramenta Beegol - Nota de Qualidade \"QOE\" - Dispositivos",
    "Ferramenta Beegol - Nota de Qualidade \"QOE\" - Wifi",
    "Ferramenta Beegol - Média Sinal RSSI (Maior que -60 - Bom, Menor que -60 Ruim)",
    "Ferramenta Beegol - Quantidade de Devices Conectados no Período",
    "Ferramenta Raio X Nota de Qualidade",
];

/// Position of the customer identifier (lookup key).
pub const IDENTIFIER: usize = 0;
/// Position of the display name.
pub const DISPLAY_NAME: usize = 1;
pub const NODE: usize = 2;
pub const MUNICIPALITY: usize = 3;
pub const CELL: usize = 4;
pub const BROADBAND_PRODUCT: usize = 7;
pub const MODEM_MODEL: usize = 8;
pub const BROADBAND_TECHNOLOGY: usize = 10;

/// Header the source is checked for before a display name is synthesized.
pub const DISPLAY_NAME_HEADER: &str = CANONICAL_COLUMNS[DISPLAY_NAME];

/// Fields shown in the key-fields panel, with their short labels.
pub const KEY_FIELDS: [(&str, usize); 8] = [
    ("Contrato/Operadora", IDENTIFIER),
    ("Nome", DISPLAY_NAME),
    ("Município", MUNICIPALITY),
    ("Node", NODE),
    ("Célula", CELL),
    ("Produto Banda Larga", BROADBAND_PRODUCT),
    ("Tecnologia", BROADBAND_TECHNOLOGY),
    ("Modem", MODEM_MODEL),
];

/// An ordered set of field names shared by every record of a dataset.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Schema {
    columns: Arc<[String]>,
}

impl Schema {
    /// The schema every loaded dataset is renamed to.
    pub fn canonical() -> Self {
        Self::new(CANONICAL_COLUMNS.iter().map(|c| c.to_string()))
    }

    /// Creates a schema from column names.
    pub fn new<I: IntoIterator<Item = String>>(columns: I) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Returns the position of the column named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.iter().position(|column| column == name)
    }
}

impl Index<usize> for Schema {
    type Output = str;

    #[inline]
    fn index(&self, index: usize) -> &str {
        &self.columns[index]
    }
}
