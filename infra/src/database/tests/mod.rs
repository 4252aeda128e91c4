mod mysql_tests;
