//! # Ontologia e Sentenças de Demonstração
//!
//! Uma mini-ontologia no estilo WordNet, em inglês, montada em torno das
//! palavras ambíguas clássicas da literatura de WSD ("bank", "interest",
//! "plant"). Ela é pequena o suficiente para ser lida inteira e é o que o
//! servidor web usa quando nenhuma ontologia externa é configurada.
//!
//! ## Aglomerados
//! - **Rio**: bank (margem), slope, river, water, fish
//! - **Finanças**: bank (instituição), financial institution, finance, money,
//!   deposit, loan, interest (juros), rate
//! - **Indústria / Botânica**: plant (fábrica), plant (vegetal), factory,
//!   worker, flower, water
//! - **Atenção**: interest (curiosidade), attention
//!
//! As relações são sempre registradas nos dois sentidos (hypernym/hyponym,
//! domain/member...), como no WordNet.

use crate::ontology::Ontology;
use crate::sense::{PartOfSpeech, Sense};

use PartOfSpeech::{Noun, Verb};

/// Retorna a ontologia de demonstração.
pub fn demo_ontology() -> Ontology {
    Ontology::new(demo_senses())
}

/// Os sentidos da ontologia de demonstração, na ordem de carga.
pub fn demo_senses() -> Vec<Sense> {
    vec![
        // ===== RIO =====
        Sense::new("bank.n.01", Noun)
            .with_lemma("bank")
            .with_sense_key("bank", "bank%1:17:01::")
            .with_gloss("sloping land (especially the slope beside a body of water)")
            .with_relation("hypernym", "slope.n.01")
            .with_relation("part_holonym", "river.n.01"),
        Sense::new("slope.n.01", Noun)
            .with_lemma("slope")
            .with_lemma("incline")
            .with_sense_key("slope", "slope%1:17:00::")
            .with_gloss("an elevated geological formation")
            .with_relation("hyponym", "bank.n.01"),
        Sense::new("river.n.01", Noun)
            .with_lemma("river")
            .with_sense_key("river", "river%1:17:00::")
            .with_gloss("a large natural stream of water")
            .with_relation("part_meronym", "bank.n.01")
            .with_relation("substance", "water.n.01")
            .with_relation("habitat_of", "fish.n.01"),
        Sense::new("water.n.01", Noun)
            .with_lemma("water")
            .with_sense_key("water", "water%1:27:00::")
            .with_gloss("binary compound that occurs at room temperature as a clear colorless liquid")
            .with_relation("substance_of", "river.n.01")
            .with_relation("needed_by", "plant.n.02"),
        Sense::new("fish.n.01", Noun)
            .with_lemma("fish")
            .with_sense_key("fish", "fish%1:05:00::")
            .with_gloss("any of various mostly cold-blooded aquatic vertebrates")
            .with_relation("lives_in", "river.n.01")
            .with_relation("derivation", "fish.v.01"),
        Sense::new("fish.v.01", Verb)
            .with_lemma("fish")
            .with_sense_key("fish", "fish%2:35:00::")
            .with_gloss("catch or try to catch fish or shellfish")
            .with_relation("derivation", "fish.n.01"),
        // ===== FINANÇAS =====
        Sense::new("bank.n.02", Noun)
            .with_lemma("bank")
            .with_sense_key("bank", "bank%1:14:00::")
            .with_gloss("a financial institution that accepts deposits and channels the money into lending activities")
            .with_relation("hypernym", "financial_institution.n.01")
            .with_relation("domain", "finance.n.01"),
        Sense::new("bank.v.01", Verb)
            .with_lemma("bank")
            .with_sense_key("bank", "bank%2:40:00::")
            .with_gloss("do business with a bank or keep an account at a bank")
            .with_relation("derivation", "bank.n.02")
            .with_relation("domain", "finance.n.01"),
        Sense::new("financial_institution.n.01", Noun)
            .with_lemma("financial institution")
            .with_gloss("an institution that collects funds and invests them")
            .with_relation("hyponym", "bank.n.02"),
        Sense::new("finance.n.01", Noun)
            .with_lemma("finance")
            .with_sense_key("finance", "finance%1:09:00::")
            .with_gloss("the branch of economics that studies the management of money")
            .with_relation("member", "bank.n.02")
            .with_relation("member", "bank.v.01")
            .with_relation("member", "money.n.01")
            .with_relation("member", "loan.n.01")
            .with_relation("member", "interest.n.01"),
        Sense::new("money.n.01", Noun)
            .with_lemma("money")
            .with_sense_key("money", "money%1:21:00::")
            .with_gloss("the most common medium of exchange")
            .with_relation("domain", "finance.n.01")
            .with_relation("derivation", "deposit.v.01"),
        Sense::new("deposit.v.01", Verb)
            .with_lemma("deposit")
            .with_sense_key("deposit", "deposit%2:40:00::")
            .with_gloss("put into a bank account")
            .with_relation("derivation", "money.n.01")
            .with_relation("domain", "finance.n.01"),
        Sense::new("loan.n.01", Noun)
            .with_lemma("loan")
            .with_sense_key("loan", "loan%1:21:00::")
            .with_gloss("the temporary provision of money (usually at interest)")
            .with_relation("domain", "finance.n.01")
            .with_relation("related", "interest.n.01"),
        Sense::new("interest.n.01", Noun)
            .with_lemma("interest")
            .with_sense_key("interest", "interest%1:21:00::")
            .with_gloss("a fixed charge for borrowing money")
            .with_relation("domain", "finance.n.01")
            .with_relation("related", "loan.n.01")
            .with_relation("related", "rate.n.01"),
        Sense::new("rate.n.01", Noun)
            .with_lemma("rate")
            .with_sense_key("rate", "rate%1:21:00::")
            .with_gloss("amount of a charge or payment relative to some basis")
            .with_relation("related", "interest.n.01"),
        // ===== ATENÇÃO =====
        Sense::new("interest.n.02", Noun)
            .with_lemma("interest")
            .with_sense_key("interest", "interest%1:09:00::")
            .with_gloss("a sense of concern with and curiosity about someone or something")
            .with_relation("hypernym", "attention.n.01"),
        Sense::new("attention.n.01", Noun)
            .with_lemma("attention")
            .with_sense_key("attention", "attention%1:09:00::")
            .with_gloss("the process whereby a person concentrates on some features of the environment")
            .with_relation("hyponym", "interest.n.02"),
        // ===== INDÚSTRIA / BOTÂNICA =====
        Sense::new("plant.n.01", Noun)
            .with_lemma("plant")
            .with_sense_key("plant", "plant%1:06:01::")
            .with_gloss("buildings for carrying on industrial labor")
            .with_relation("hypernym", "factory.n.01")
            .with_relation("related", "worker.n.01"),
        Sense::new("factory.n.01", Noun)
            .with_lemma("factory")
            .with_sense_key("factory", "factory%1:06:00::")
            .with_gloss("a plant consisting of buildings with facilities for manufacturing")
            .with_relation("hyponym", "plant.n.01"),
        Sense::new("worker.n.01", Noun)
            .with_lemma("worker")
            .with_sense_key("worker", "worker%1:18:00::")
            .with_gloss("a person who works at a specific occupation")
            .with_relation("related", "plant.n.01"),
        Sense::new("plant.n.02", Noun)
            .with_lemma("plant")
            .with_lemma("flora")
            .with_sense_key("plant", "plant%1:03:00::")
            .with_gloss("a living organism lacking the power of locomotion")
            .with_relation("needs", "water.n.01")
            .with_relation("hyponym", "flower.n.01"),
        Sense::new("flower.n.01", Noun)
            .with_lemma("flower")
            .with_sense_key("flower", "flower%1:20:00::")
            .with_gloss("a plant cultivated for its blooms or blossoms")
            .with_relation("hypernym", "plant.n.02"),
    ]
}

/// Textos de demonstração `(domínio, texto)` para a interface web.
pub fn demo_sentences() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Finanças", "She deposited the money in the bank to earn interest."),
        ("Rio", "They sat on the bank of the river and watched the fish."),
        ("Indústria", "The plant hired a hundred new workers for the factory."),
        ("Botânica", "Water the plant every morning so the flower does not wilt."),
        ("Atenção", "The lecture caught the attention and interest of every student."),
        ("Erro de digitação", "The bnak charged interest on the loan."),
    ]
}
