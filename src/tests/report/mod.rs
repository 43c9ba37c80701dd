mod outcome_tests;
