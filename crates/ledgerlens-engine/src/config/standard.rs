//! Built-in classification tables for the covered departments.
//!
//! Keyword lists were derived from analysis of the unique expense types
//! observed across the three departments; the direct mappings cover the
//! top expense types, which account for the large majority of rows.

use std::collections::BTreeMap;

use crate::ledger::Category;

const KEYWORDS: [(Category, &[&str]); 8] = [
    (
        Category::It,
        &[
            "software",
            "IT",
            "licence",
            "license",
            "system",
            "digital",
            "cloud",
            "hosting",
            "server",
            "hardware",
            "telephony",
            "computer",
            "laptop",
            "ICT",
            "infrastructure",
            "network",
            "data centre",
            "data center",
            "IT RUN",
            "END USER COMPUTER",
            "NETWORKING",
            "DATA CHARGES",
            "application licensing",
            "technical service",
            "connectivity",
        ],
    ),
    (
        Category::Consultancy,
        &[
            "consultancy",
            "consulting",
            "consultant",
            "advisory",
            "professional services",
            "technical",
            "organisational",
            "organizational",
            "market",
            "research",
            "audit",
            "accounting",
            "finance",
            "tax",
            "forensic",
            "HIRE OF CONSULTANTS",
            "MANAGEMENT CONSULT",
            "user research",
        ],
    ),
    (
        Category::Construction,
        &[
            "construction",
            "building",
            "infrastructure",
            "AUC",
            "capital",
            "renewal",
            "maintenance",
            "estate",
            "facilities",
            "refurbishment",
            "repair",
            "property",
            "leasehold",
            "BUILDING SERVICE",
            "ESTATE MANAGEMENT",
            "PROPERTY MAINTENANCE",
            "vessel maintenance",
            "motorcycle maintenance",
        ],
    ),
    (
        Category::Operations,
        &[
            "TOC",
            "train",
            "rail",
            "travel",
            "accommodation",
            "hotel",
            "vehicle",
            "fleet",
            "fuel",
            "fares",
            "aviation",
            "franchise",
            "utilities",
            "electricity",
            "gas",
            "water",
            "energy",
            "marketing",
            "advertising",
            "campaign",
            "media",
            "PR",
            "postal",
            "courier",
            "mail",
            "ARVAL FUEL",
            "RAIL FARES",
            "ASYLUM SEEKER TRAVEL",
            "eurocontrol",
            "flying charge",
            "corporate travel",
        ],
    ),
    (
        Category::Legal,
        &[
            "legal",
            "barrister",
            "solicitor",
            "counsel",
            "appeal",
            "litigation",
            "tribunal",
            "LEGAL ADVICE",
            "LEGAL REPRESENTATION",
            "ADVERSE LEGAL",
            "claim",
            "liability",
        ],
    ),
    (
        Category::HrStaffing,
        &[
            "contingent labour",
            "mandays",
            "recruitment",
            "contractor",
            "agency",
            "temporary",
            "staffing",
            "personnel",
            "CONTINGENT LABOUR",
            "PROJECT MANDAYS",
            "AGENCY STAFF",
            "basic salary",
            "salary",
            "apprentice levy",
            "partner: staffing",
            "technical partner",
            "commercial partner",
        ],
    ),
    (
        Category::Grants,
        &[
            "grant",
            "grt",
            "subsidy",
            "subsid",
            "aid",
            "fund",
            "payment to",
            "transfer",
            "GRT AID",
            "CAP GRT",
            "CURR GRT",
            "CAPITAL GRANT",
            "grant in aid",
        ],
    ),
    (
        Category::Administrative,
        &[
            "business rates",
            "insurance",
            "car parking",
            "parking",
            "conference",
            "training",
            "learning",
            "subscription",
            "membership",
            "office",
            "stationery",
            "supplies",
            "camera",
            "equipment",
            "bank charges",
            "block charges",
            "service charge",
            "allocation",
            "PFI",
            "unitary",
            "suspense",
            "GR/IR",
            "CS LEARNING",
            "CONFERENCES",
            "BPO VOLUMETRIC",
            "DIRECT COSTS",
            "FM ALLOCATION",
            "printing",
            "non-stock",
            "expense claim",
        ],
    ),
];

const HMRC_DIRECT: [(&str, Category); 20] = [
    ("PROJECT Mandays Supp", Category::HrStaffing),
    ("Utility Payments - electricity", Category::Operations),
    ("PROJECT Mandays HMRC", Category::HrStaffing),
    ("Project Development", Category::It),
    ("Physical Hosting and Infrastructure", Category::It),
    ("System Maintenance", Category::It),
    (
        "Property Management Services (Irrecoverable VAT)",
        Category::Construction,
    ),
    ("Project support", Category::It),
    ("Desktop Services", Category::It),
    ("Rent (Irrec VAT)", Category::Construction),
    ("Virtual Hosting and Infrastructure", Category::It),
    ("IT Software Licenses and Support", Category::It),
    ("Employee education", Category::Administrative),
    ("Contin Labor Build", Category::HrStaffing),
    ("Contracted Services", Category::Operations),
    ("Consultancy - IT", Category::Consultancy),
    ("Projects VAT irrec", Category::It),
    ("Tribunal appellant costs", Category::Legal),
    ("Maintenance fees", Category::Construction),
    ("Contingent Labour Build", Category::HrStaffing),
];

const HOME_OFFICE_DIRECT: [(&str, Category); 20] = [
    ("IT RUN COST", Category::It),
    ("CONTINGENT LABOUR OTHER", Category::HrStaffing),
    ("OTHER ICT COSTS", Category::It),
    ("SYSTEM CLEARING", Category::It),
    ("FULL COST", Category::HrStaffing),
    ("RESEARCH AND DEVELOPMENT", Category::Consultancy),
    ("HOSTING", Category::It),
    ("ASYLUM CASES", Category::Operations),
    ("END USER COMPUTER SOFTWARE", Category::It),
    ("IN COUNTRY ESCORT", Category::Operations),
    ("ADVICE", Category::Consultancy),
    ("RUN COSTS", Category::Operations),
    ("SPECIALIST USER SOFTWARE & HARDWARE", Category::It),
    ("BASIC SALARY", Category::HrStaffing),
    ("CONTRACTS", Category::Operations),
    ("PROJECT", Category::It),
    ("LEGAL ADVICE", Category::Legal),
    ("AD PRODUCTION", Category::Operations),
    ("FLEET MANAGEMENT", Category::Operations),
    ("OTHER", Category::Administrative),
];

const DFT_DIRECT: [(&str, Category); 20] = [
    ("TA Cost AUC - Programme", Category::Construction),
    ("TA Renewal of Roads - Capital", Category::Construction),
    ("Subsidies Private Se", Category::Grants),
    ("TA Renewal of Structures - Capital", Category::Construction),
    ("Cap Grt Loc Auth", Category::Grants),
    ("TA Cost AUC  Non SRN", Category::Construction),
    ("CM - Lump Sum Fees", Category::Construction),
    ("AUC - Phase 1", Category::Construction),
    ("Contractor Costs", Category::HrStaffing),
    ("RM Cost Reimbursable", Category::Construction),
    ("TA Cost AUC \u{2013} Non SRN", Category::Construction),
    ("Support Services", Category::Administrative),
    ("Research", Category::Consultancy),
    ("Professional Services", Category::Consultancy),
    ("Cap Grt Pri Sec-Cos.", Category::Grants),
    ("Mail Collection/Deli", Category::Operations),
    ("IT Ser Running Costs", Category::It),
    ("Consultants Costs", Category::Consultancy),
    ("PFI Service Payments", Category::Administrative),
    ("TOCOpCosts(Pub)", Category::Operations),
];

pub(crate) fn keyword_table() -> Vec<(Category, Vec<String>)> {
    KEYWORDS
        .iter()
        .map(|(category, words)| {
            let owned = words
                .iter()
                .map(|word| (*word).to_string())
                .collect::<Vec<String>>();
            (*category, owned)
        })
        .collect()
}

pub(crate) fn direct_mapping() -> BTreeMap<String, BTreeMap<String, Category>> {
    let mut mapping = BTreeMap::new();
    mapping.insert("HMRC".to_string(), department_mapping(&HMRC_DIRECT));
    mapping.insert(
        "Home Office".to_string(),
        department_mapping(&HOME_OFFICE_DIRECT),
    );
    mapping.insert("DfT".to_string(), department_mapping(&DFT_DIRECT));
    mapping
}

fn department_mapping(entries: &[(&str, Category)]) -> BTreeMap<String, Category> {
    entries
        .iter()
        .map(|(expense_type, category)| ((*expense_type).to_string(), *category))
        .collect()
}
