//! Subcommand handlers. Each builds its report as a string before printing it.

use std::time::Duration;

use chrono::Local;
use domain_allocation::model::{entity::AllocationRequest, vo::sum_per_cluster};
use tokio::time::sleep;
use tracing::info;

use crate::cli::{AccountArgs, Command, IdleArgs};
use crate::infrastructure::ServiceProvider;
use crate::report;

pub async fn run(command: Command, sp: &ServiceProvider) -> anyhow::Result<()> {
    match command {
        Command::Idle(args) => idle(args, sp).await,
        Command::Usage(args) => {
            let account = resolve_account(args, sp).await?;
            print!("{}", usage_report(&account, sp).await?);
            Ok(())
        }
        Command::Sus(args) => {
            let account = resolve_account(args, sp).await?;
            println!("{}", sus_report(&account, sp).await?);
            Ok(())
        }
        Command::ProposalEnd(args) => {
            let account = resolve_account(args, sp).await?;
            println!("{}", proposal_end_report(&account, sp).await?);
            Ok(())
        }
    }
}

async fn resolve_account(args: AccountArgs, sp: &ServiceProvider) -> anyhow::Result<String> {
    let account = match args.account {
        Some(account) => account,
        None => sp.allocation_service.default_account().await?,
    };
    sp.allocation_service.ensure_account_exists(&account).await?;
    Ok(account)
}

async fn idle(args: IdleArgs, sp: &ServiceProvider) -> anyhow::Result<()> {
    let Some(period) = args.watch else {
        print!("{}", idle_report(&args, sp).await?);
        return Ok(());
    };
    loop {
        let report = idle_report(&args, sp).await?;
        println!("Idle resources at {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"));
        print!("{report}");
        tokio::select! {
            _ = sleep(Duration::from_secs(period)) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Stop watching idle resources (ctrl-c handling).");
                return Ok(());
            }
        }
    }
}

async fn idle_report(args: &IdleArgs, sp: &ServiceProvider) -> anyhow::Result<String> {
    let service = &sp.idle_resource_service;
    let clusters = if args.clusters.is_empty() {
        service.clusters()
    } else {
        args.clusters.clone()
    };

    let mut out = String::new();
    for cluster in &clusters {
        let partitions = if args.partitions.is_empty() {
            service.list_partitions(cluster).await?
        } else {
            args.partitions.clone()
        };
        let kind = service.resource_kind(cluster);
        for partition in &partitions {
            let idle = service.count_idle(cluster, partition).await?;
            out.push_str(&report::format_idle_table(cluster, partition, kind, &idle));
        }
    }
    Ok(out)
}

/// Active requests, or the last expired one when none is active. The flag marks the fallback.
async fn current_requests(
    account: &str,
    sp: &ServiceProvider,
) -> anyhow::Result<(Vec<AllocationRequest>, bool)> {
    let active = sp.allocation_service.get_active_requests(account).await?;
    if !active.is_empty() {
        return Ok((active, false));
    }
    let expired = sp
        .allocation_service
        .get_most_recent_expired_request(account)
        .await?;
    Ok((expired.into_iter().collect(), true))
}

async fn usage_report(account: &str, sp: &ServiceProvider) -> anyhow::Result<String> {
    let (requests, expired) = current_requests(account, sp).await?;
    if requests.is_empty() {
        return Ok(format!("No allocation requests were found for account '{account}'\n"));
    }

    let mut out = String::new();
    if expired {
        out.push_str(&format!(
            "No active allocation for '{account}', showing the most recent expired request\n"
        ));
    }
    let per_request = sp.allocation_service.get_awards_per_request(&requests).await?;
    out.push_str(&report::format_request_table(account, &requests, &per_request));

    let per_cluster = sum_per_cluster(&per_request);
    let start = sp.allocation_service.get_earliest_start_date(&requests);
    let summaries = sp
        .usage_reconcile_service
        .build_usage_summaries(account, &per_cluster, start)
        .await?;
    out.push('\n');
    out.push_str(&report::format_usage_table(account, start, &summaries));
    Ok(out)
}

async fn sus_report(account: &str, sp: &ServiceProvider) -> anyhow::Result<String> {
    let requests = sp.allocation_service.get_active_requests(account).await?;
    let awards = sp.allocation_service.get_awards_per_cluster(&requests).await?;
    let clusters = sp.idle_resource_service.clusters();
    Ok(report::format_sus(account, &clusters, &awards))
}

async fn proposal_end_report(account: &str, sp: &ServiceProvider) -> anyhow::Result<String> {
    let (mut requests, expired) = current_requests(account, sp).await?;
    requests.sort_by_key(|r| (r.expire_date, r.id));
    Ok(report::format_proposal_end(account, &requests, expired))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use domain_allocation::{
        exception::AllocationException,
        mock::{MockAccountRepo, MockAllocationRepo, MockUsageRepo},
        model::{
            entity::{ClusterAllocation, RequestStatus},
            vo::{AccountUsage, UsageRecord},
        },
    };
    use domain_resource::{
        mock::{MockNodeInventoryRepo, MockPartitionRepo},
        model::vo::{ClusterTypes, ResourceKind},
    };
    use service_allocation::{AllocationServiceImpl, UsageReconcileServiceImpl};
    use service_resource::IdleResourceServiceImpl;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(id: u64, active: NaiveDate, expire: NaiveDate) -> AllocationRequest {
        AllocationRequest {
            id,
            title: format!("Proposal {id}"),
            active_date: active,
            expire_date: expire,
            status: RequestStatus::Approved,
        }
    }

    fn allocation_repo(requests: Vec<AllocationRequest>, allocation_calls: Option<usize>) -> MockAllocationRepo {
        let mut allocations = MockAllocationRepo::new();
        allocations
            .expect_get_research_group_id()
            .returning(|account| Ok((account == "sam").then_some(42)));
        allocations
            .expect_get_approved_requests()
            .returning(move |_| Ok(requests.clone()));
        let expectation = allocations.expect_get_allocations();
        if let Some(calls) = allocation_calls {
            expectation.times(calls);
        }
        expectation.returning(|request_id| {
            Ok(vec![
                ClusterAllocation {
                    request_id,
                    cluster_name: "smp".to_string(),
                    awarded: Some(1000),
                },
                ClusterAllocation {
                    request_id,
                    cluster_name: "gpu".to_string(),
                    awarded: Some(1500),
                },
            ])
        });
        allocations
    }

    fn provider(requests: Vec<AllocationRequest>) -> ServiceProvider {
        provider_with(allocation_repo(requests, None))
    }

    fn provider_with(allocations: MockAllocationRepo) -> ServiceProvider {
        let mut accounts = MockAccountRepo::new();
        accounts.expect_account_exists().returning(|account| Ok(account == "sam"));
        accounts.expect_default_account().returning(|| Ok("sam".to_string()));

        let mut usage = MockUsageRepo::new();
        usage.expect_get_account_usage().returning(|_, cluster, _| {
            Ok((cluster == "smp").then(|| AccountUsage {
                total_used: 2000,
                per_user: vec![UsageRecord {
                    cluster_name: cluster.to_string(),
                    user_name: "sam".to_string(),
                    used: 2000,
                }],
            }))
        });

        let mut partitions = MockPartitionRepo::new();
        partitions
            .expect_get_partition_names()
            .returning(|_| Ok(vec!["smp".to_string()]));

        ServiceProvider {
            idle_resource_service: Arc::new(
                IdleResourceServiceImpl::builder()
                    .node_inventory_repo(Arc::new(MockNodeInventoryRepo::new()))
                    .partition_repo(Arc::new(partitions))
                    .cluster_types(ClusterTypes::new([
                        ("smp".to_string(), ResourceKind::Cores),
                        ("gpu".to_string(), ResourceKind::Gpus),
                        ("htc".to_string(), ResourceKind::Cores),
                    ]))
                    .build(),
            ),
            allocation_service: Arc::new(
                AllocationServiceImpl::builder()
                    .allocation_repo(Arc::new(allocations))
                    .account_repo(Arc::new(accounts))
                    .today(date(2025, 6, 1))
                    .build(),
            ),
            usage_reconcile_service: Arc::new(
                UsageReconcileServiceImpl::builder()
                    .usage_repo(Arc::new(usage))
                    .build(),
            ),
        }
    }

    fn active() -> Vec<AllocationRequest> {
        vec![
            request(1, date(2025, 1, 1), date(2026, 1, 1)),
            request(2, date(2025, 3, 1), date(2026, 3, 1)),
            request(3, date(2023, 1, 1), date(2024, 1, 1)),
        ]
    }

    #[tokio::test]
    async fn usage_report_reconciles_awards() {
        let sp = provider(active());
        let report = usage_report("sam", &sp).await.unwrap();
        assert!(report.contains("Resource Allocation Request Information for 'sam'"));
        assert!(report.contains("'sam' since 2025-01-01"));
        assert!(report.contains(" CLUSTER: gpu | AWARDED: 3000 | TOTAL USED: 0 | % USED: 0 | REMAINING: 3000"));
        assert!(report.contains(" CLUSTER: smp | AWARDED: 2000 | TOTAL USED: 2000 | % USED: 100 | REMAINING: 0"));
        assert!(report.contains(" LOCKED: the award on smp"));
        assert!(!report.contains("expired"));
    }

    #[tokio::test]
    async fn usage_report_fetches_allocations_once_per_request() {
        let sp = provider_with(allocation_repo(active(), Some(2)));
        let report = usage_report("sam", &sp).await.unwrap();
        assert!(report.contains(" CLUSTER: gpu | AWARDED: 3000 "));
    }

    #[tokio::test]
    async fn usage_report_falls_back_to_expired_request() {
        let sp = provider(vec![request(3, date(2023, 1, 1), date(2024, 1, 1))]);
        let report = usage_report("sam", &sp).await.unwrap();
        assert!(report.contains("showing the most recent expired request"));
        assert!(report.contains("2024-01-01"));
        // Usage never counts from before the reset date.
        assert!(report.contains("'sam' since 2024-05-07"));
    }

    #[tokio::test]
    async fn usage_report_without_requests() {
        let sp = provider(vec![]);
        assert_eq!(
            usage_report("sam", &sp).await.unwrap(),
            "No allocation requests were found for account 'sam'\n"
        );
    }

    #[tokio::test]
    async fn unknown_account() {
        let sp = provider(active());
        let err = resolve_account(
            AccountArgs {
                account: Some("nobody".to_string()),
            },
            &sp,
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "No Slurm account was found with the name 'nobody'.");
        assert!(matches!(
            err.downcast_ref::<AllocationException>(),
            Some(AllocationException::UnknownAccount { .. })
        ));
    }

    #[tokio::test]
    async fn default_account() {
        let sp = provider(active());
        let account = resolve_account(AccountArgs { account: None }, &sp).await.unwrap();
        assert_eq!(account, "sam");
    }

    #[tokio::test]
    async fn sus_report_lists_every_cluster() {
        let sp = provider(active());
        assert_eq!(
            sus_report("sam", &sp).await.unwrap(),
            "Account sam\n cluster gpu has 3,000 SUs\n cluster htc has 0 SUs\n cluster smp has 2,000 SUs"
        );
    }

    #[tokio::test]
    async fn proposal_end() {
        let sp = provider(active());
        assert_eq!(
            proposal_end_report("sam", &sp).await.unwrap(),
            "Proposal 1 (Proposal 1) for account 'sam' ends on 01/01/26\n\
             Proposal 2 (Proposal 2) for account 'sam' ends on 03/01/26"
        );

        let sp = provider(vec![request(3, date(2023, 1, 1), date(2024, 1, 1))]);
        assert_eq!(
            proposal_end_report("sam", &sp).await.unwrap(),
            "Proposal 3 (Proposal 3) for account 'sam' ended on 01/01/24"
        );
    }

    #[tokio::test]
    async fn idle_report_for_selected_partitions() {
        let mut inventory = MockNodeInventoryRepo::new();
        inventory.expect_get_node_samples().returning(|_, _, _| Ok(vec![]));
        let mut sp = provider(vec![]);
        sp.idle_resource_service = Arc::new(
            IdleResourceServiceImpl::builder()
                .node_inventory_repo(Arc::new(inventory))
                .partition_repo(Arc::new(MockPartitionRepo::new()))
                .cluster_types(ClusterTypes::default())
                .build(),
        );
        let args = IdleArgs {
            clusters: vec!["teach".to_string()],
            partitions: vec!["cpu".to_string(), "gpu".to_string()],
            watch: None,
        };
        let report = idle_report(&args, &sp).await.unwrap();
        assert!(report.contains("Cluster: teach, Partition: cpu\n"));
        assert!(report.contains("Cluster: teach, Partition: gpu\n"));
        assert_eq!(report.matches(" No idle resources").count(), 2);
    }
}
