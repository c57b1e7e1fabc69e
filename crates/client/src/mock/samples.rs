//! Fixed demo dataset, four rows per tab.

use prospect_core::{ItemDetails, SignalType, Tab};

/// One canned result row.
#[derive(Debug, Clone)]
pub struct Sample {
    pub title: &'static str,
    pub url: &'static str,
    pub domain: &'static str,
    pub snippet: &'static str,
    pub details: ItemDetails,
}

fn s(
    title: &'static str, url: &'static str, domain: &'static str, snippet: &'static str, details: ItemDetails,
) -> Sample {
    Sample { title, url, domain, snippet, details }
}

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn company(name: &str, industry: &str, location: &str) -> ItemDetails {
    ItemDetails::Company { company_name: name.into(), industry: some(industry), location: some(location) }
}

fn person(name: &str, role: &str, organization: &str) -> ItemDetails {
    ItemDetails::Person { name: name.into(), role: some(role), organization: some(organization) }
}

fn news(publisher: &str, published_at: &str) -> ItemDetails {
    ItemDetails::News { publisher: publisher.into(), published_at: some(published_at) }
}

fn signal(signal_type: SignalType, company: &str) -> ItemDetails {
    ItemDetails::Signal { signal_type, company: some(company) }
}

fn market(metric: &str) -> ItemDetails {
    ItemDetails::Market { metric: some(metric) }
}

fn patent(number: &str, assignee: &str) -> ItemDetails {
    ItemDetails::Patent { patent_number: some(number), assignee: some(assignee) }
}

fn paper(authors: &[&str], year: u16, venue: &str) -> ItemDetails {
    ItemDetails::Paper { authors: authors.iter().map(|a| a.to_string()).collect(), year: Some(year), venue: some(venue) }
}

/// The demo rows for `tab`, in their unrotated order.
pub fn samples(tab: Tab) -> Vec<Sample> {
    match tab {
        Tab::Companies => vec![
            s(
                "Northwind Robotics | Company Profile",
                "https://www.crunchbase.com/organization/northwind-robotics",
                "crunchbase.com",
                "Northwind Robotics builds autonomous picking arms for mid-size warehouses.",
                company("Northwind Robotics", "Industrial Automation", "Austin, TX"),
            ),
            s(
                "Helio Grid Systems",
                "https://www.linkedin.com/company/helio-grid",
                "linkedin.com",
                "Helio Grid Systems sells battery storage controllers to regional utilities.",
                company("Helio Grid Systems", "Energy Storage", "Denver, CO"),
            ),
            s(
                "Lumen Ledger - Official Site",
                "https://lumenledger.example.com",
                "lumenledger.example.com",
                "Lumen Ledger offers reconciliation software for finance teams.",
                company("Lumen Ledger", "Fintech", "London, UK"),
            ),
            s(
                "Quarry Bio | PitchBook",
                "https://pitchbook.com/profiles/company/quarry-bio",
                "pitchbook.com",
                "Quarry Bio develops enzyme platforms for industrial fermentation.",
                company("Quarry Bio", "Biotechnology", "Boston, MA"),
            ),
        ],
        Tab::People => vec![
            s(
                "Maya Chen - Chief Executive Officer - Northwind Robotics",
                "https://www.linkedin.com/in/maya-chen-example",
                "linkedin.com",
                "Co-founder and CEO, previously led operations at a logistics startup.",
                person("Maya Chen", "Chief Executive Officer", "Northwind Robotics"),
            ),
            s(
                "Daniel Okafor - Head of Partnerships - Helio Grid Systems",
                "https://www.linkedin.com/in/daniel-okafor-example",
                "linkedin.com",
                "Leads utility partnerships and channel sales across North America.",
                person("Daniel Okafor", "Head of Partnerships", "Helio Grid Systems"),
            ),
            s(
                "Priya Raman (@priyabuilds)",
                "https://x.com/priyabuilds",
                "x.com",
                "Founder at Lumen Ledger. Writing about finance operations tooling.",
                person("Priya Raman", "Founder", "Lumen Ledger"),
            ),
            s(
                "Tomas Lindqvist - Director of Research - Quarry Bio",
                "https://github.com/tlindqvist-example",
                "github.com",
                "Directs the enzyme engineering group and maintains open tooling.",
                person("Tomas Lindqvist", "Director of Research", "Quarry Bio"),
            ),
        ],
        Tab::News => vec![
            s(
                "Warehouse automation spending climbs as labor stays tight",
                "https://www.reuters.com/business/warehouse-automation-example",
                "reuters.com",
                "Operators are accelerating robot deployments ahead of peak season.",
                news("Reuters", "2025-03-04T09:00:00Z"),
            ),
            s(
                "Utilities turn to software-defined storage",
                "https://www.bloomberg.com/news/articles/storage-software-example",
                "bloomberg.com",
                "Grid operators are buying controllers that squeeze more out of existing batteries.",
                news("Bloomberg", "2025-02-18T14:30:00Z"),
            ),
            s(
                "Finance teams adopt continuous close tools",
                "https://techcrunch.com/2025/01/22/continuous-close-example",
                "techcrunch.com",
                "A new wave of startups promises month-end close in days, not weeks.",
                news("TechCrunch", "2025-01-22T16:00:00Z"),
            ),
            s(
                "Biomanufacturing capacity expands in New England",
                "https://www.ft.com/content/biomanufacturing-example",
                "ft.com",
                "Fermentation start-ups are signing long-term capacity deals.",
                news("Financial Times", "2024-12-09T08:15:00Z"),
            ),
        ],
        Tab::Signals => vec![
            s(
                "Northwind Robotics raises $40M Series B",
                "https://techcrunch.com/2025/03/01/northwind-series-b-example",
                "techcrunch.com",
                "The round will fund expansion into European fulfillment centers.",
                signal(SignalType::Funding, "Northwind Robotics"),
            ),
            s(
                "Helio Grid Systems acquires controller startup VoltMesh",
                "https://www.reuters.com/markets/deals/helio-voltmesh-example",
                "reuters.com",
                "The acquisition adds residential storage to Helio's portfolio.",
                signal(SignalType::Acquisition, "Helio Grid Systems"),
            ),
            s(
                "Lumen Ledger is hiring 30 engineers in Lisbon",
                "https://lumenledger.example.com/careers",
                "lumenledger.example.com",
                "Open roles span platform, data and integrations.",
                signal(SignalType::Hiring, "Lumen Ledger"),
            ),
            s(
                "Quarry Bio announces partnership with a contract manufacturer",
                "https://www.cnbc.com/2025/02/11/quarry-bio-partnership-example",
                "cnbc.com",
                "The partnership secures pilot-scale fermentation capacity through 2027.",
                signal(SignalType::Partnership, "Quarry Bio"),
            ),
        ],
        Tab::Market => vec![
            s(
                "Warehouse Robotics Market Size Report, 2025-2030",
                "https://www.grandviewresearch.com/industry-analysis/warehouse-robotics-example",
                "grandviewresearch.com",
                "The market is projected to grow at a 14.2% CAGR through 2030.",
                market("14.2% CAGR"),
            ),
            s(
                "Grid-Scale Battery Storage Market Forecast",
                "https://www.marketsandmarkets.com/grid-storage-example",
                "marketsandmarkets.com",
                "Global installed value is expected to reach $31.2 billion by 2029.",
                market("$31.2 billion"),
            ),
            s(
                "Financial Close Software Market Share Analysis",
                "https://www.gartner.com/en/documents/close-software-example",
                "gartner.com",
                "Vendors reported a combined USD 4.1 billion in annual revenue.",
                market("USD 4.1 billion"),
            ),
            s(
                "Industrial Enzymes Industry Report",
                "https://www.statista.com/outlook/industrial-enzymes-example",
                "statista.com",
                "Demand is expanding at a CAGR of 6.5% driven by food processing.",
                market("CAGR of 6.5%"),
            ),
        ],
        Tab::Patents => vec![
            s(
                "US11234567B2 - Adaptive suction gripper for mixed-SKU picking",
                "https://patents.google.com/patent/US11234567B2/en",
                "patents.google.com",
                "A gripper that adjusts suction zones based on item geometry.",
                patent("US11234567B2", "Northwind Robotics Inc."),
            ),
            s(
                "EP3987654A1 - Battery string balancing controller",
                "https://patents.google.com/patent/EP3987654A1/en",
                "patents.google.com",
                "Balancing strings of cells using predictive load estimates.",
                patent("EP3987654A1", "Helio Grid Systems LLC"),
            ),
            s(
                "US20240123456A1 - Continuous ledger reconciliation",
                "https://patents.google.com/patent/US20240123456A1/en",
                "patents.google.com",
                "Matching bank transactions to ledger entries in near real time.",
                patent("US20240123456A1", "Lumen Ledger Ltd."),
            ),
            s(
                "WO2023112233A1 - Thermostable hydrolase variants",
                "https://patentscope.wipo.int/search/en/WO2023112233",
                "wipo.int",
                "Engineered enzyme variants with improved stability above 70C.",
                patent("WO2023112233A1", "Quarry Bio Inc."),
            ),
        ],
        Tab::ResearchPapers => vec![
            s(
                "Learning Grasp Policies for Cluttered Bins",
                "https://arxiv.org/abs/2401.01234",
                "arxiv.org",
                "We present a grasp planner trained on two million simulated picks.",
                paper(&["M. Chen", "R. Alvarez"], 2024, "arXiv"),
            ),
            s(
                "Predictive Balancing for Grid Battery Strings",
                "https://www.semanticscholar.org/paper/predictive-balancing-example",
                "semanticscholar.org",
                "A study of model-predictive control for cell balancing at utility scale.",
                paper(&["D. Okafor", "L. Wu"], 2023, "IEEE Transactions on Smart Grid"),
            ),
            s(
                "Anomaly Detection in Continuous Accounting Streams",
                "https://dl.acm.org/doi/10.1145/example",
                "acm.org",
                "Abstract: unsupervised methods for flagging ledger anomalies.",
                paper(&["P. Raman"], 2024, "ACM KDD"),
            ),
            s(
                "Directed Evolution of Thermostable Hydrolases",
                "https://www.researchgate.net/publication/hydrolases-example",
                "researchgate.net",
                "We report variants retaining 90% activity after one hour at 75C.",
                paper(&["T. Lindqvist", "A. Berg", "S. Ito"], 2022, "Nature Catalysis"),
            ),
        ],
    }
}
