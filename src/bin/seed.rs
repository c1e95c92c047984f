use chrono::NaiveDate;
use clap::Parser;
use fake::{
    faker::{internet::en::SafeEmail, name::en::Name},
    Fake,
};
use rand::{seq::SliceRandom, Rng};
use youth_registry::{
    config::Settings,
    db::DbPool,
    domain::TShirtSize,
    error::AppError,
    service::MemberService,
    validation::MemberInput,
};

/// Fill the registry with made-up members for local testing.
#[derive(Parser, Debug)]
#[command(name = "seed")]
struct Args {
    /// How many members to register
    #[arg(short, long, default_value_t = 20)]
    count: usize,
}

fn fake_member(rng: &mut impl Rng) -> MemberInput {
    let yes_no = ["Sim", "Não"];
    let size = TShirtSize::ALL
        .choose(rng)
        .map(|s| s.as_str())
        .unwrap_or("M");

    MemberInput {
        member_name: Name().fake_with_rng(rng),
        // (AA) 9XNNN-NNNN with no zero in the area code or right after the 9
        phone_number: format!(
            "({}{}) 9{}{:03}-{:04}",
            rng.gen_range(1..=9),
            rng.gen_range(1..=9),
            rng.gen_range(1..=9),
            rng.gen_range(0..1_000),
            rng.gen_range(0..10_000)
        ),
        t_shirt: size.to_string(),
        food_allergy: yes_no[rng.gen_range(0..2)].to_string(),
        sower: yes_no[rng.gen_range(0..2)].to_string(),
        ministry_position: yes_no[rng.gen_range(0..2)].to_string(),
        date_birth: NaiveDate::from_ymd_opt(
            rng.gen_range(2000..=2012),
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
        ),
        email: rng
            .gen_bool(0.8)
            .then(|| SafeEmail().fake_with_rng(rng)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    println!("🌱 Starting database seeding...");

    let settings = Settings::new()?;
    let db_pool = DbPool::connect(&settings.database).await?;

    println!("📋 Creating schema...");
    db_pool.ensure_schema(&settings.database).await?;

    let service = MemberService::new(db_pool.member_repository(), false);
    let mut rng = rand::thread_rng();

    println!("👥 Creating {} members...", args.count);
    let mut created = 0;
    let mut skipped = 0;
    for _ in 0..args.count {
        match service.create_member(fake_member(&mut rng)).await {
            Ok(_) => created += 1,
            Err(AppError::DuplicateMember) | Err(AppError::Validation(_)) => skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }

    println!("  ✅ Created {} members ({} skipped)", created, skipped);

    let summary = service.summary().await?;
    println!("🎉 Registry now holds {} members", summary.total);

    db_pool.close().await;
    Ok(())
}
