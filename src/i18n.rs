//! Report labels in English, French and German.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    French,
    German,
}

/// `(id, english, french, german)`
const MESSAGES: &[(&str, &str, &str, &str)] = &[
    ("report.calculations", "Calculations", "Calculations", "Kalkulationen"),
    (
        "report.state",
        "Calculations by status",
        "Calculations par statut",
        "Kalkulationen nach Status",
    ),
    ("report.month", "Calculations by month", "Calculations par mois", "Kalkulationen nach Monat"),
    ("report.items", "Calculation {id}", "Calculation {id}", "Kalkulation {id}"),
    (
        "report.empty",
        "Calculations with empty items",
        "Calculations avec articles vides",
        "Kalkulationen mit leeren Artikeln",
    ),
    (
        "report.duplicate",
        "Calculations with duplicate items",
        "Calculations avec articles en double",
        "Kalkulationen mit doppelten Artikeln",
    ),
    (
        "report.empty.description",
        "Items with a price or a quantity equal to zero.",
        "Articles dont le prix ou la quantité est égal à zéro.",
        "Artikel mit einem Preis oder einer Menge von null.",
    ),
    (
        "report.duplicate.description",
        "Items with the same description within a calculation.",
        "Articles avec la même description dans une calculation.",
        "Artikel mit derselben Beschreibung in einer Kalkulation.",
    ),
    ("calculation.id", "ID", "ID", "ID"),
    ("calculation.date", "Date", "Date", "Datum"),
    ("calculation.state", "Status", "Statut", "Status"),
    ("calculation.customer", "Customer", "Client", "Kunde"),
    ("calculation.description", "Description", "Description", "Beschreibung"),
    ("calculation.items", "Items", "Articles", "Artikel"),
    ("calculation.margin", "Margin", "Marge", "Marge"),
    ("calculation.margin_percent", "Margin %", "Marge %", "Marge %"),
    ("calculation.overall", "Total", "Total", "Total"),
    ("calculation.count", "Count", "Nombre", "Anzahl"),
    ("calculation.percent", "%", "%", "%"),
    ("calculation.month", "Month", "Mois", "Monat"),
    ("item.description", "Description", "Description", "Beschreibung"),
    ("item.unit", "Unit", "Unité", "Einheit"),
    ("item.price", "Price", "Prix", "Preis"),
    ("item.quantity", "Quantity", "Quantité", "Menge"),
    ("item.total", "Total", "Total", "Total"),
    ("item.count", "Count", "Nombre", "Anzahl"),
    ("item.group", "Group", "Groupe", "Gruppe"),
    ("group.name", "Group", "Groupe", "Gruppe"),
    ("group.amount", "Amount", "Montant", "Betrag"),
    ("group.margin", "Margin %", "Marge %", "Marge %"),
    ("group.margin_amount", "Margin", "Marge", "Marge"),
    ("group.total", "Total", "Total", "Total"),
    ("total.label", "Total", "Total", "Total"),
    ("total.group", "Total {code}", "Total {code}", "Total {code}"),
    ("total.items", "Items total", "Total des articles", "Total Artikel"),
    ("total.groups", "Groups total", "Total des groupes", "Total Gruppen"),
    ("total.global_margin", "Global margin", "Marge globale", "Globale Marge"),
    ("total.net", "Total net", "Total net", "Total netto"),
    ("total.user_margin", "User margin", "Marge utilisateur", "Benutzermarge"),
    ("total.overall", "Overall total", "Total général", "Gesamttotal"),
    ("total.overall_margin", "Overall margin", "Marge totale", "Gesamtmarge"),
    (
        "counters.calculations",
        "{count} calculation(s)",
        "{count} calculation(s)",
        "{count} Kalkulation(en)",
    ),
    ("counters.items", "{count} item(s)", "{count} article(s)", "{count} Artikel"),
    ("footer.page", "Page {page} / {pages}", "Page {page} / {pages}", "Seite {page} / {pages}"),
    ("footer.printed", "Printed on {date}", "Imprimé le {date}", "Gedruckt am {date}"),
];

const MONTHS: [[&str; 12]; 3] = [
    [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
        "octobre", "novembre", "décembre",
    ],
    [
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
        "Oktober", "November", "Dezember",
    ],
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Label for `id`, or `id` itself when unknown.
    pub fn trans(&self, id: &str) -> String {
        MESSAGES
            .iter()
            .find(|(key, ..)| *key == id)
            .map(|(_, en, fr, de)| match self.language {
                Language::English => *en,
                Language::French => *fr,
                Language::German => *de,
            })
            .unwrap_or(id)
            .to_string()
    }

    /// Label for `id` with `{name}` placeholders replaced.
    pub fn trans_with(&self, id: &str, parameters: &[(&str, &str)]) -> String {
        parameters
            .iter()
            .fold(self.trans(id), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }

    /// Month name for `month` in 1..=12; empty otherwise.
    pub fn month_name(&self, month: u32) -> &'static str {
        let index = match self.language {
            Language::English => 0,
            Language::French => 1,
            Language::German => 2,
        };
        match month {
            1..=12 => MONTHS[index][month as usize - 1],
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trans_falls_back_to_id() {
        let translator = Translator::new(Language::French);
        assert_eq!(translator.trans("item.price"), "Prix");
        assert_eq!(translator.trans("unknown.id"), "unknown.id");
    }

    #[test]
    fn test_trans_with_parameters() {
        let translator = Translator::new(Language::German);
        assert_eq!(
            translator.trans_with("footer.page", &[("page", "2"), ("pages", "5")]),
            "Seite 2 / 5"
        );
    }

    #[test]
    fn test_month_names() {
        assert_eq!(Translator::new(Language::English).month_name(12), "December");
        assert_eq!(Translator::new(Language::French).month_name(2), "février");
        assert_eq!(Translator::new(Language::French).month_name(13), "");
    }
}
