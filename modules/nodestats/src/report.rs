//! Console previews of the output tables.

use nodestats_core::{AsnCloudCount, CloudProviderCount, CountryCount, Ranked};

const PREVIEW_ROWS: usize = 10;

pub fn print_ranked_asns(rows: &[Ranked<AsnCloudCount>], with_names: bool) {
    if with_names {
        println!(
            "{:>10}  {:>10}  {:<32}  {:>8}  {:>14}",
            "rank", "asn", "asn_name", "is_cloud", "instance_count"
        );
    } else {
        println!(
            "{:>10}  {:>10}  {:>8}  {:>14}",
            "rank", "asn", "is_cloud", "instance_count"
        );
    }
    for r in rows.iter().take(PREVIEW_ROWS) {
        let rank = if r.rank.is_unknown() {
            "-".to_string()
        } else {
            r.rank.rank.to_string()
        };
        if with_names {
            println!(
                "{:>10}  {:>10}  {:<32}  {:>8}  {:>14}",
                rank,
                r.row.asn,
                r.rank.name.as_deref().unwrap_or_default(),
                u8::from(r.row.is_cloud),
                r.row.instance_count
            );
        } else {
            println!(
                "{:>10}  {:>10}  {:>8}  {:>14}",
                rank,
                r.row.asn,
                u8::from(r.row.is_cloud),
                r.row.instance_count
            );
        }
    }
    print_elided(rows.len(), PREVIEW_ROWS);
}

pub fn print_asn_cloud(rows: &[AsnCloudCount]) {
    println!("{:>10}  {:>8}  {:>14}", "asn", "is_cloud", "instance_count");
    for r in rows.iter().take(PREVIEW_ROWS) {
        println!("{:>10}  {:>8}  {:>14}", r.asn, u8::from(r.is_cloud), r.instance_count);
    }
    print_elided(rows.len(), PREVIEW_ROWS);
}

pub fn print_cloud_providers(rows: &[CloudProviderCount]) {
    println!("{:<24}  {:>12}", "cloud_provider", "domain_count");
    for r in rows {
        println!("{:<24}  {:>12}", r.cloud_provider, r.domain_count);
    }
}

pub fn print_countries(rows: &[CountryCount]) {
    println!("{:<12}  {:>12}", "country_code", "domain_count");
    for r in rows.iter().take(5) {
        println!("{:<12}  {:>12}", r.country_code, r.domain_count);
    }
    print_elided(rows.len(), 5);
}

fn print_elided(total: usize, shown: usize) {
    if total > shown {
        println!("... ({} more rows)", total - shown);
    }
}
