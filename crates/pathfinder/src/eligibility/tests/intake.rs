use chrono::NaiveDate;
use serde_json::json;

use crate::eligibility::domain::{Achievement, EducationLevel, Money};
use crate::eligibility::intake::{IntakeError, ProfileIntake, ProfileSubmission};

fn submission(value: serde_json::Value) -> ProfileSubmission {
    serde_json::from_value(value).expect("submission deserializes")
}

#[test]
fn questionnaire_fields_become_a_typed_profile() {
    let intake = ProfileIntake::default();
    let profile = intake
        .profile_from_submission(submission(json!({
            "age": "30",
            "education": "bachelorsThreeYear",
            "workExperience": 2,
            "isPaidWork": "Yes",
            "workLocation": ["China", "  ", "Canada"],
            "annualSalary": "40,000",
            "salaryCurrency": "gbp",
            "ielts": { "listening": "7", "speaking": 6.5, "reading": "6.5", "writing": "6" },
            "higherEducation": "No",
            "extraordinaryAbility": "No"
        })))
        .expect("submission is valid");

    assert_eq!(profile.age, Some(30));
    assert_eq!(profile.education, Some(EducationLevel::BachelorsThreeYear));
    assert_eq!(profile.work_experience_years, Some(2));
    assert!(profile.paid_work);
    assert_eq!(profile.work_locations.len(), 2);
    assert!(profile.work_locations.contains("Canada"));
    assert_eq!(profile.annual_salary, Some(Money::new(40_000.0, "GBP")));
    assert_eq!(profile.language.listening, Some(7.0));
    assert_eq!(profile.language.speaking, Some(6.5));
    assert!(!profile.higher_education);
    assert!(!profile.extraordinary_ability);
    assert!(profile.investment.is_none());
    assert!(profile.business.is_none());
}

#[test]
fn blank_and_unusable_numbers_become_absent() {
    let profile = ProfileIntake::default()
        .profile_from_submission(submission(json!({
            "age": "",
            "workExperience": "-3",
            "annualSalary": "lots",
            "ielts": { "listening": true, "reading": -1 }
        })))
        .expect("degraded fields do not reject the submission");

    assert_eq!(profile.age, None);
    assert_eq!(profile.work_experience_years, None);
    assert_eq!(profile.annual_salary, None);
    assert_eq!(profile.language.listening, None);
    assert_eq!(profile.language.reading, None);
}

#[test]
fn fractional_counts_are_floored() {
    let profile = ProfileIntake::default()
        .profile_from_submission(submission(json!({
            "age": 29.9,
            "workExperience": "3.5"
        })))
        .expect("submission is valid");

    assert_eq!(profile.age, Some(29));
    assert_eq!(profile.work_experience_years, Some(3));
}

#[test]
fn money_without_currency_uses_the_default() {
    let profile = ProfileIntake::with_default_currency("eur")
        .profile_from_submission(submission(json!({ "annualSalary": 50000 })))
        .expect("submission is valid");

    assert_eq!(profile.annual_salary, Some(Money::new(50_000.0, "EUR")));
    assert_eq!(ProfileIntake::default().default_currency().as_str(), "USD");
}

#[test]
fn investment_intent_requires_a_yes_answer() {
    let intake = ProfileIntake::default();

    let declined = intake
        .profile_from_submission(submission(json!({
            "investments": "No",
            "investmentBudget": "900000"
        })))
        .expect("submission is valid");
    assert!(declined.investment.is_none());

    let investor = intake
        .profile_from_submission(submission(json!({
            "investments": "Yes",
            "investmentBudget": "100000",
            "netWorth": "2500000",
            "netWorthCurrency": "EUR"
        })))
        .expect("submission is valid");
    let intent = investor.investment.expect("investment intent recorded");
    assert_eq!(intent.budget, Some(Money::new(100_000.0, "USD")));
    assert_eq!(intent.net_worth, Some(Money::new(2_500_000.0, "EUR")));
}

#[test]
fn business_intent_accepts_boolean_answers() {
    let profile = ProfileIntake::default()
        .profile_from_submission(submission(json!({
            "startBusiness": true,
            "businessFunding": "60000",
            "businessCurrency": "CAD"
        })))
        .expect("submission is valid");

    let intent = profile.business.expect("business intent recorded");
    assert_eq!(intent.funding, Some(Money::new(60_000.0, "CAD")));
}

#[test]
fn achievements_are_matched_by_tag() {
    let profile = ProfileIntake::default()
        .profile_from_submission(submission(json!({
            "extraordinaryAbility": "Yes",
            "extraordinaryAchievements": ["peer_review", "HIGH_SALARY", ""]
        })))
        .expect("submission is valid");

    assert!(profile.extraordinary_ability);
    assert_eq!(
        profile.achievements.into_iter().collect::<Vec<_>>(),
        vec![Achievement::PeerReview, Achievement::HighSalary]
    );
}

#[test]
fn unknown_vocabulary_rejects_the_submission() {
    let intake = ProfileIntake::default();

    let error = intake
        .profile_from_submission(submission(json!({ "education": "apprentice" })))
        .expect_err("unknown education is rejected");
    assert_eq!(error, IntakeError::UnknownEducation("apprentice".to_string()));

    let error = intake
        .profile_from_submission(submission(json!({
            "extraordinaryAchievements": ["olympic_medal"]
        })))
        .expect_err("unknown achievement is rejected");
    assert_eq!(error, IntakeError::UnknownAchievement("olympic_medal".to_string()));
}

#[test]
fn graduation_needs_a_date_and_a_university() {
    let intake = ProfileIntake::default();

    let graduate = intake
        .profile_from_submission(submission(json!({
            "higherEducation": "Yes",
            "graduationDate": "2024-03-15",
            "university": "Harvard University"
        })))
        .expect("submission is valid");
    let graduation = graduate.graduation.expect("graduation recorded");
    assert_eq!(graduation.university, "Harvard University");
    assert_eq!(
        graduation.graduated_on,
        NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
    );

    let no_university = intake
        .profile_from_submission(submission(json!({ "graduationDate": "2024-03-15" })))
        .expect("submission is valid");
    assert!(no_university.graduation.is_none());

    let error = intake
        .profile_from_submission(submission(json!({
            "graduationDate": "15/03/2024",
            "university": "Harvard University"
        })))
        .expect_err("malformed date is rejected");
    assert_eq!(
        error.to_string(),
        "graduation date '15/03/2024' is not a YYYY-MM-DD date"
    );
}
