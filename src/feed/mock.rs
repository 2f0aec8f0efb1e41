// src/feed/mock.rs
//! Mock news providers: template-generated French and Arabic articles for
//! demo and test runs. No network anywhere — a live provider would slot in
//! behind the same [`NewsProvider`] trait.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::types::{Article, NewsProvider};
use super::universe::{self, Company};

/// One syndication source the mock feed can impersonate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsSource {
    pub key: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub language: &'static str,
}

pub const SOURCES: &[NewsSource] = &[
    NewsSource {
        key: "kapitalis",
        name: "Kapitalis",
        url: "https://kapitalis.com",
        language: "fr",
    },
    NewsSource {
        key: "ilboursa",
        name: "IlBoursa",
        url: "https://ilboursa.com",
        language: "ar",
    },
    NewsSource {
        key: "tunisienumerique",
        name: "Tunisie Numérique",
        url: "https://tunisienumerique.com",
        language: "fr",
    },
];

/// Template-driven article generator for one source.
pub struct MockProvider {
    source: &'static NewsSource,
    rng: Mutex<StdRng>,
}

impl MockProvider {
    pub fn new(key: &str) -> Result<Self> {
        Self::with_rng(key, StdRng::from_os_rng())
    }

    /// Deterministic generator for tests.
    pub fn with_seed(key: &str, seed: u64) -> Result<Self> {
        Self::with_rng(key, StdRng::seed_from_u64(seed))
    }

    fn with_rng(key: &str, rng: StdRng) -> Result<Self> {
        let source = SOURCES
            .iter()
            .find(|s| s.key == key)
            .ok_or_else(|| anyhow!("unknown mock source `{key}`"))?;
        Ok(Self {
            source,
            rng: Mutex::new(rng),
        })
    }

    /// Providers for every known source, fresh entropy.
    pub fn all() -> Vec<Box<dyn NewsProvider>> {
        SOURCES
            .iter()
            .map(|s| {
                Box::new(MockProvider {
                    source: s,
                    rng: Mutex::new(StdRng::from_os_rng()),
                }) as Box<dyn NewsProvider>
            })
            .collect()
    }

    /// Seeded providers for every known source (deterministic runs).
    pub fn all_seeded(seed: u64) -> Vec<Box<dyn NewsProvider>> {
        SOURCES
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Box::new(MockProvider {
                    source: s,
                    rng: Mutex::new(StdRng::seed_from_u64(seed.wrapping_add(i as u64))),
                }) as Box<dyn NewsProvider>
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl NewsProvider for MockProvider {
    async fn fetch_latest(&self, max_articles: usize) -> Result<Vec<Article>> {
        let mut rng = self.rng.lock().expect("mock rng mutex poisoned");
        let upper = max_articles.clamp(2, 4);
        let count = rng.random_range(2..=upper);

        let mut out = Vec::with_capacity(count);
        for i in 0..count {
            let company = universe::UNIVERSE
                .choose(&mut *rng)
                .expect("non-empty universe");
            let (title, content) = if self.source.language == "ar" {
                arabic_article(&mut rng, company)
            } else {
                french_article(&mut rng, company)
            };

            let published = Utc::now()
                - Duration::days(rng.random_range(0..=7))
                - Duration::hours(rng.random_range(0..24))
                - Duration::minutes(rng.random_range(0..60));

            out.push(Article {
                id: format!(
                    "{}_{}_{}",
                    self.source.key,
                    i,
                    Utc::now().timestamp_millis()
                ),
                title,
                content,
                source: self.source.name.to_string(),
                source_url: Some(self.source.url.to_string()),
                published_date: published,
                language: self.source.language.to_string(),
                mentioned_stocks: vec![company.symbol.to_string()],
            });
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        self.source.name
    }
}

fn french_article(rng: &mut StdRng, company: &Company) -> (String, String) {
    let templates: [String; 5] = [
        format!(
            "{} annonce des résultats exceptionnels pour le trimestre",
            company.name_fr
        ),
        format!(
            "{} fait face à des défis dans le secteur {}",
            company.name_fr, company.sector
        ),
        format!(
            "Nouveau contrat pour {} avec un partenaire international",
            company.name_fr
        ),
        format!(
            "{} maintient une position stable malgré le contexte économique",
            company.name_fr
        ),
        format!(
            "Baisse des ventes pour {} au dernier trimestre",
            company.name_fr
        ),
    ];
    let title = templates.choose(rng).expect("non-empty templates").clone();

    let mut content = format!("{title}. ");
    content.push_str("La société a démontré une performance remarquable dans un environnement complexe. ");
    content.push_str(&format!(
        "Les analystes suivent avec attention l'évolution de {}. ",
        company.name_fr
    ));
    content.push_str(&format!(
        "Le secteur {} connaît des transformations importantes. ",
        company.sector
    ));
    content.push_str("Les investisseurs anticipent des développements futurs pour l'entreprise.");
    (title, content)
}

fn arabic_article(rng: &mut StdRng, company: &Company) -> (String, String) {
    let templates: [String; 5] = [
        format!("{} تعلن عن نتائج استثنائية للربع", company.name_ar),
        format!("{} تواجه تحديات في قطاع {}", company.name_ar, company.sector),
        format!("عقد جديد لـ {} مع شريك دولي", company.name_ar),
        format!(
            "{} تحافظ على وضع مستقر رغم الظروف الاقتصادية",
            company.name_ar
        ),
        format!("انخفاض مبيعات {} في الربع الأخير", company.name_ar),
    ];
    let title = templates.choose(rng).expect("non-empty templates").clone();

    let mut content = format!("{title}. ");
    content.push_str("أظهرت الشركة أداءً ملحوظاً في بيئة معقدة. ");
    content.push_str(&format!("يتبع المحللون بتأنّ تطورات {}. ", company.name_ar));
    content.push_str(&format!("يشهد قطاع {} تحولات كبيرة. ", company.sector));
    content.push_str("يتوقع المستثمرون تطورات مستقبلية للشركة.");
    (title, content)
}
