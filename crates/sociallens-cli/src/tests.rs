use super::*;

use chrono::NaiveDate;
use sociallens_api::{BrandSort, SettingsSection};
use sociallens_app::{DatePreset, PostSortKey};

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["sociallens"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_home_search() {
    let cli = Cli::try_parse_from(["sociallens", "home", "--search", "share of voice"])
        .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Home { search }) => assert_eq!(search.as_deref(), Some("share of voice")),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn brands_list_defaults_to_name_order() {
    let cli = Cli::try_parse_from(["sociallens", "brands", "list"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Brands {
            command: BrandsCommands::List {
                search: None,
                sort: BrandSort::NameAsc
            }
        })
    ));
}

#[test]
fn brands_list_accepts_newest_first() {
    let cli = Cli::try_parse_from(["sociallens", "brands", "list", "--sort", "date_added_desc"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Brands {
            command: BrandsCommands::List {
                sort: BrandSort::DateAddedDesc,
                ..
            }
        })
    ));
}

#[test]
fn brands_add_collects_repeated_urls() {
    let cli = Cli::try_parse_from([
        "sociallens",
        "brands",
        "add",
        "--name",
        "Acme",
        "--url",
        "twitter.com/acme",
        "--url",
        "instagram.com/acme",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Brands {
            command:
                BrandsCommands::Add {
                    name,
                    logo_url,
                    urls,
                },
        }) => {
            assert_eq!(name, "Acme");
            assert!(logo_url.is_none());
            assert_eq!(urls, vec!["twitter.com/acme", "instagram.com/acme"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn brands_add_requires_a_url() {
    let result = Cli::try_parse_from(["sociallens", "brands", "add", "--name", "Acme"]);
    assert!(result.is_err());
}

#[test]
fn brands_edit_with_patch_flag() {
    let cli = Cli::try_parse_from([
        "sociallens",
        "brands",
        "edit",
        "b-1",
        "--remove-url",
        "https://twitter.com/acme",
        "--patch",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Brands {
            command:
                BrandsCommands::Edit {
                    id,
                    name,
                    remove_urls,
                    patch,
                    ..
                },
        }) => {
            assert_eq!(id, "b-1");
            assert!(name.is_none());
            assert_eq!(remove_urls, vec!["https://twitter.com/acme"]);
            assert!(patch);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn brands_delete_accepts_lookup_limit() {
    let cli = Cli::try_parse_from(["sociallens", "brands", "delete", "b-9", "--limit", "500"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Brands {
            command: BrandsCommands::Delete {
                limit: Some(500),
                ..
            }
        })
    ));
}

#[test]
fn brands_edit_lookup_limit_defaults_to_server_page() {
    let cli = Cli::try_parse_from(["sociallens", "brands", "edit", "b-1", "--name", "Acme"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Brands {
            command: BrandsCommands::Edit { limit: None, .. }
        })
    ));
}

#[test]
fn analytics_defaults() {
    let cli = Cli::try_parse_from(["sociallens", "analytics"]).expect("expected valid cli args");

    match cli.command {
        Some(Commands::Analytics(args)) => {
            assert!(args.brands.is_empty());
            assert!(args.channels.is_empty());
            assert!(args.preset.is_none());
            assert!(args.sort.is_none());
            assert!(!args.asc);
            assert_eq!(args.page, 1);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn analytics_preset_and_filters() {
    let cli = Cli::try_parse_from([
        "sociallens",
        "analytics",
        "--preset",
        "last_7_days",
        "--channel",
        "TikTok",
        "--brand",
        "Acme",
        "--sort",
        "views",
        "--asc",
        "--page",
        "2",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Analytics(args)) => {
            assert_eq!(args.preset, Some(DatePreset::Last7Days));
            assert_eq!(args.channels, vec!["TikTok"]);
            assert_eq!(args.brands, vec!["Acme"]);
            assert_eq!(args.sort, Some(PostSortKey::Views));
            assert!(args.asc);
            assert_eq!(args.page, 2);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn analytics_custom_range() {
    let cli = Cli::try_parse_from([
        "sociallens",
        "analytics",
        "--from",
        "2024-03-01",
        "--to",
        "2024-03-15",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Analytics(args)) => {
            assert_eq!(args.from, NaiveDate::from_ymd_opt(2024, 3, 1));
            assert_eq!(args.to, NaiveDate::from_ymd_opt(2024, 3, 15));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn analytics_preset_conflicts_with_custom_range() {
    let result = Cli::try_parse_from([
        "sociallens",
        "analytics",
        "--preset",
        "this_month",
        "--from",
        "2024-03-01",
        "--to",
        "2024-03-15",
    ]);
    assert!(result.is_err());
}

#[test]
fn analytics_from_requires_to() {
    let result = Cli::try_parse_from(["sociallens", "analytics", "--from", "2024-03-01"]);
    assert!(result.is_err());
}

#[test]
fn analytics_rejects_unknown_preset() {
    let result = Cli::try_parse_from(["sociallens", "analytics", "--preset", "yesterday"]);
    assert!(result.is_err());
}

#[test]
fn parses_reports_view() {
    let cli =
        Cli::try_parse_from(["sociallens", "reports", "view", "3"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Reports {
            command: ReportsCommands::View { id: 3 }
        })
    ));
}

#[test]
fn reports_list_type_filter() {
    let cli = Cli::try_parse_from(["sociallens", "reports", "list", "--type", "share_of_voice"])
        .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Reports {
            command:
                ReportsCommands::List {
                    search,
                    brand,
                    report_type,
                },
        }) => {
            assert!(search.is_none());
            assert!(brand.is_none());
            assert_eq!(report_type.as_deref(), Some("share_of_voice"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn settings_save_mcp_server() {
    let cli = Cli::try_parse_from([
        "sociallens",
        "settings",
        "save",
        "mcp-server",
        "--server-url",
        "https://mcp.example.com",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Settings {
            command: SettingsCommands::Save { section, changes },
        }) => {
            assert_eq!(section, SettingsSection::McpServer);
            assert_eq!(changes.server_url.as_deref(), Some("https://mcp.example.com"));
            assert!(changes.first_name.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn settings_save_repeated_competitors() {
    let cli = Cli::try_parse_from([
        "sociallens",
        "settings",
        "save",
        "workspace",
        "--add-competitor",
        "Globex",
        "--add-competitor",
        "Initech",
        "--remove-competitor",
        "Umbrella",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Settings {
            command: SettingsCommands::Save { section, changes },
        }) => {
            assert_eq!(section, SettingsSection::Workspace);
            assert_eq!(changes.add_competitors, vec!["Globex", "Initech"]);
            assert_eq!(changes.remove_competitors, vec!["Umbrella"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn settings_save_rejects_unknown_section() {
    let result = Cli::try_parse_from(["sociallens", "settings", "save", "billing"]);
    assert!(result.is_err());
}

#[test]
fn settings_connect_with_token() {
    let cli = Cli::try_parse_from(["sociallens", "settings", "connect", "tiktok", "--token", "t0k"])
        .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Settings {
            command: SettingsCommands::Connect { platform, token },
        }) => {
            assert_eq!(platform, "tiktok");
            assert_eq!(token, "t0k");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_whoami() {
    let cli = Cli::try_parse_from(["sociallens", "whoami"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Whoami)));
}

#[test]
fn commands_map_to_views() {
    assert_eq!(Commands::Whoami.view(), View::Home);
    assert_eq!(
        Commands::Reports {
            command: ReportsCommands::View { id: 1 }
        }
        .view(),
        View::Reports { report: None }
    );
    assert!(Commands::Whoami.needs_user());
    assert!(!Commands::Home { search: None }.needs_user());
}

#[test]
fn truncate_marks_cut() {
    assert_eq!(truncate("abcdef", 3), "abc...");
    assert_eq!(truncate("abc", 3), "abc");
}
