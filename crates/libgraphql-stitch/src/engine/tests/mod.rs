mod hydration_merge_tests;
